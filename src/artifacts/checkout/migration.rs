//! Working-tree migration planning
//!
//! Restoring a snapshot, checking out a single file and applying a merge all come down to the
//! same plan: a set of files to write with known blob contents and a set of tracked files to
//! delete. The plan is built from snapshots alone and validated against the working directory
//! before anything is applied, so a rejected migration leaves no trace.
//!
//! ## Safety
//!
//! A file that exists in the working directory but is not tracked by the checked-out commit is
//! "in the way" when the migration would write over it with different content. Files tracked by
//! the checked-out commit are always safe to overwrite or delete.

use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SprigError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Type of file system action required for a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    /// Create a file not tracked by the checked-out commit
    Add,
    /// Delete a tracked file
    Delete,
    /// Rewrite a tracked file
    Modify,
}

/// Planned working-tree changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    adds: Vec<(PathBuf, Option<ObjectId>)>,
    deletes: Vec<(PathBuf, Option<ObjectId>)>,
    modifies: Vec<(PathBuf, Option<ObjectId>)>,
}

impl Migration {
    /// Plan the move from the `current` snapshot to `target`
    ///
    /// Every path tracked by `target` is written, which also discards local edits to tracked
    /// files. Paths tracked only by `current` are deleted.
    pub fn between(current: &Snapshot, target: &Snapshot) -> Self {
        let mut migration = Migration::default();

        for (path, oid) in target.tracked() {
            let action = if current.is_tracked(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            migration.record(action, path.clone(), Some(oid.clone()));
        }

        for path in current.tracked().keys() {
            if !target.is_tracked(path) {
                migration.record(ActionType::Delete, path.clone(), None);
            }
        }

        migration
    }

    /// Plan writing a single file with the given content
    pub fn single_file(current: &Snapshot, path: PathBuf, oid: ObjectId) -> Self {
        let mut migration = Migration::default();

        let action = if current.is_tracked(&path) {
            ActionType::Modify
        } else {
            ActionType::Add
        };
        migration.record(action, path, Some(oid));

        migration
    }

    pub fn record(&mut self, action: ActionType, path: PathBuf, oid: Option<ObjectId>) {
        let actions = match action {
            ActionType::Add => &mut self.adds,
            ActionType::Delete => &mut self.deletes,
            ActionType::Modify => &mut self.modifies,
        };

        actions.push((path, oid));
    }

    pub fn actions(&self, action: ActionType) -> &[(PathBuf, Option<ObjectId>)] {
        match action {
            ActionType::Add => &self.adds,
            ActionType::Delete => &self.deletes,
            ActionType::Modify => &self.modifies,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.deletes.is_empty() && self.modifies.is_empty()
    }

    /// Paths that will hold new content once the migration is applied
    pub fn written_paths(&self) -> BTreeMap<&Path, &ObjectId> {
        self.adds
            .iter()
            .chain(self.modifies.iter())
            .filter_map(|(path, oid)| oid.as_ref().map(|oid| (path.as_path(), oid)))
            .collect()
    }

    fn deleted_paths(&self) -> BTreeSet<&Path> {
        self.deletes
            .iter()
            .map(|(path, _)| path.as_path())
            .collect()
    }

    /// Written paths currently occupied by a directory that still holds files after the
    /// migration's own deletions
    pub fn blocking_directories(&self, workspace: &Workspace) -> Vec<PathBuf> {
        let deleted = self.deleted_paths();

        self.written_paths()
            .into_keys()
            .filter(|path| workspace.is_dir(path))
            .filter(|path| {
                workspace
                    .files_under(path)
                    .iter()
                    .any(|file| !deleted.contains(file.as_path()))
            })
            .map(Path::to_path_buf)
            .collect()
    }

    /// Fail with `UntrackedFileInWay` if applying would clobber files the repository does not
    /// know about
    ///
    /// Files in `current` are the ones tracked by the checked-out commit. Any other file written
    /// by an `Add` action is in the way unless it already holds the incoming content, and so is a
    /// directory standing where any file is about to be written.
    pub fn check_untracked(&self, workspace: &Workspace, current: &Snapshot) -> anyhow::Result<()> {
        let deleted = self.deleted_paths();
        let mut in_the_way = self
            .blocking_directories(workspace)
            .into_iter()
            .collect::<BTreeSet<_>>();

        for (path, oid) in &self.adds {
            if current.is_tracked(path) {
                continue;
            }

            if workspace.is_file(path) {
                let Some(oid) = oid else { continue };
                if &workspace.parse_blob(path)?.object_id()? != oid {
                    in_the_way.insert(path.clone());
                }
            }

            // an untracked file cannot turn into a directory either
            for ancestor in path.ancestors().skip(1) {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                if workspace.is_file(ancestor)
                    && !current.is_tracked(ancestor)
                    && !deleted.contains(ancestor)
                {
                    in_the_way.insert(ancestor.to_path_buf());
                }
            }
        }

        if in_the_way.is_empty() {
            Ok(())
        } else {
            Err(SprigError::UntrackedFileInWay(in_the_way.into_iter().collect()).into())
        }
    }
}
