use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Parents};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SprigError;
use std::io::Write;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        let (head_oid, head) = self.head_commit()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate(head.snapshot().clone())?;

        if stage.is_clean() {
            return Err(SprigError::NothingToCommit.into());
        }

        if message.trim().is_empty() {
            return Err(SprigError::EmptyMessage.into());
        }

        let commit = Commit::new(
            Parents::Single(head_oid),
            Commit::load_timestamp_from_env(),
            message.to_string(),
            stage.to_snapshot(),
        );
        let commit_id = self.write_commit(&commit)?;
        stage.reset_to(commit.snapshot().clone())?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch()?,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }

    /// Store a commit and move the current branch and HEAD onto it
    pub(crate) fn write_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let commit_id = self.database().store(commit)?;
        self.refs().advance(&commit_id)?;

        Ok(commit_id)
    }
}
