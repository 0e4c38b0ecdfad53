use crate::areas::repository::Repository;
use crate::areas::stage::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

/// Read-only status report, every section sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: BranchName,
    pub(crate) branches: Vec<BranchName>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    pub fn current_branch(&self) -> &BranchName {
        &self.current_branch
    }

    pub fn branches(&self) -> &[BranchName] {
        &self.branches
    }

    pub fn staged_files(&self) -> &FileSet {
        &self.staged_files
    }

    pub fn removed_files(&self) -> &FileSet {
        &self.removed_files
    }

    pub fn workspace_changeset(&self) -> &ChangeSet {
        &self.workspace_changeset
    }

    pub fn untracked_files(&self) -> &FileSet {
        &self.untracked_files
    }

    /// No staged changes, no unstaged modifications and no untracked files
    pub fn is_clean(&self) -> bool {
        self.staged_files.is_empty()
            && self.removed_files.is_empty()
            && self.workspace_changeset.is_empty()
            && self.untracked_files.is_empty()
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(f, "*{}", branch.as_ref().green())?;
            } else {
                writeln!(f, "{}", branch)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "=== Staged Files ===")?;
        for path in &self.staged_files {
            writeln!(f, "{}", path.display())?;
        }
        writeln!(f)?;

        writeln!(f, "=== Removed Files ===")?;
        for path in &self.removed_files {
            writeln!(f, "{}", path.display())?;
        }
        writeln!(f)?;

        writeln!(f, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &self.workspace_changeset {
            writeln!(f, "{} ({})", path.display(), change)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Untracked Files ===")?;
        for path in &self.untracked_files {
            writeln!(f, "{}", path.display())?;
        }
        writeln!(f)
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    /// Build the report from a staging area already rehydrated against HEAD
    pub fn initialize(&self, stage: &StagingArea) -> anyhow::Result<StatusInfo> {
        let current_branch = self.repository.refs().current_branch()?;
        let branches = self.repository.refs().list_branches()?;

        let tracked = stage.tracked();
        let workspace_changeset = self.check_tracked_files(&tracked)?;
        let untracked_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|path| !tracked.contains_key(path))
            .collect::<FileSet>();

        Ok(StatusInfo {
            current_branch,
            branches,
            staged_files: stage.added().keys().cloned().collect(),
            removed_files: stage.removed().clone(),
            workspace_changeset,
            untracked_files,
        })
    }

    fn check_tracked_files(
        &self,
        tracked: &BTreeMap<PathBuf, ObjectId>,
    ) -> anyhow::Result<ChangeSet> {
        let inspector = Inspector::new(self.repository.workspace());
        let mut changeset = ChangeSet::new();

        for (path, oid) in tracked {
            if let Some(change) = inspector.check_tracked_against_workspace(path, oid)? {
                changeset.insert(path.clone(), change);
            }
        }

        Ok(changeset)
    }
}
