use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Inspector<'w> {
    workspace: &'w Workspace,
}

impl<'w> Inspector<'w> {
    fn is_content_changed(&self, path: &Path, tracked_oid: &ObjectId) -> anyhow::Result<bool> {
        let blob = self.workspace.parse_blob(path)?;
        let oid = blob.object_id()?;

        Ok(&oid != tracked_oid)
    }

    /// Compare a tracked file with its working copy
    ///
    /// Content is always hashed: there is no stat cache to short-circuit on.
    pub fn check_tracked_against_workspace(
        &self,
        path: &Path,
        tracked_oid: &ObjectId,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        if !self.workspace.is_file(path) {
            return Ok(Some(WorkspaceChangeType::Deleted));
        }

        if self.is_content_changed(path, tracked_oid)? {
            Ok(Some(WorkspaceChangeType::Modified))
        } else {
            Ok(None)
        }
    }
}
