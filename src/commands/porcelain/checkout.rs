use crate::areas::repository::Repository;
use crate::areas::stage::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Snapshot;
use crate::errors::SprigError;

/// The three shapes `checkout` accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutTarget {
    /// `checkout -- <file>`: restore a file from HEAD
    HeadFile(String),
    /// `checkout <commit> -- <file>`: restore a file from any commit
    CommitFile { commit: String, file: String },
    /// `checkout <branch>`: switch branches
    Branch(String),
}

impl CheckoutTarget {
    /// Build a target from the operand before `--` and the one after it
    pub fn from_operands(target: Option<&str>, file: Option<&str>) -> anyhow::Result<Self> {
        match (target, file) {
            (None, Some(file)) => Ok(CheckoutTarget::HeadFile(file.to_string())),
            (Some(commit), Some(file)) => Ok(CheckoutTarget::CommitFile {
                commit: commit.to_string(),
                file: file.to_string(),
            }),
            (Some(branch), None) => Ok(CheckoutTarget::Branch(branch.to_string())),
            (None, None) => Err(SprigError::InvalidOperands.into()),
        }
    }
}

impl Repository {
    pub async fn checkout(&mut self, target: &CheckoutTarget) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        match target {
            CheckoutTarget::HeadFile(file) => self.checkout_head_file(file),
            CheckoutTarget::CommitFile { commit, file } => {
                self.checkout_commit_file(commit, file).await
            }
            CheckoutTarget::Branch(branch) => self.checkout_branch(branch).await,
        }
    }

    fn checkout_head_file(&self, file: &str) -> anyhow::Result<()> {
        let path = self.resolve_path(file)?;
        let (_, head) = self.head_commit()?;

        let blob_id = head
            .snapshot()
            .blob_for(&path)
            .ok_or(SprigError::FileNotInCommit)?;

        // HEAD tracks the file, so nothing untracked can be in the way
        let migration = Migration::single_file(head.snapshot(), path, blob_id.clone());
        self.workspace().apply_migration(&migration, self.database())
    }

    async fn checkout_commit_file(&self, commit: &str, file: &str) -> anyhow::Result<()> {
        let path = self.resolve_path(file)?;
        let commit_oid = self.database().resolve_commit(commit)?;
        let commit = self.database().parse_commit(&commit_oid)?;

        let blob_id = commit
            .snapshot()
            .blob_for(&path)
            .ok_or(SprigError::FileNotInCommit)?;

        let (_, head) = self.head_commit()?;
        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate(head.snapshot().clone())?;

        // staged-only files are not tracked by the checked-out commit
        let current = stage.head();
        let migration = Migration::single_file(current, path, blob_id.clone());
        migration.check_untracked(self.workspace(), current)?;

        self.workspace().apply_migration(&migration, self.database())
    }

    async fn checkout_branch(&self, branch: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(branch.to_string()).map_err(|_| SprigError::UnknownBranch)?;
        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or(SprigError::UnknownBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(SprigError::AlreadyOnBranch.into());
        }

        let target = self.database().parse_commit(&target_oid)?;
        let (_, head) = self.head_commit()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate(head.snapshot().clone())?;

        self.restore_snapshot(&stage, target.snapshot())?;

        self.refs().set_current_branch(&branch_name)?;
        self.refs().update_head(&target_oid)?;
        stage.reset_to(target.snapshot().clone())?;

        Ok(())
    }

    /// Make the working directory match `target`
    ///
    /// Files tracked by the HEAD commit but absent from `target` are deleted. Fails with
    /// `UntrackedFileInWay` before touching anything if a file the HEAD commit does not track
    /// would be overwritten, staged or not.
    pub(crate) fn restore_snapshot(
        &self,
        stage: &StagingArea,
        target: &Snapshot,
    ) -> anyhow::Result<()> {
        let migration = Migration::between(stage.head(), target);
        migration.check_untracked(self.workspace(), stage.head())?;

        self.workspace().apply_migration(&migration, self.database())
    }
}
