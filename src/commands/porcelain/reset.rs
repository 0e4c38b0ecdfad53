use crate::areas::repository::Repository;

impl Repository {
    /// Check out an arbitrary commit and move the current branch onto it
    pub async fn reset(&mut self, commit: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self.database().resolve_commit(commit)?;
        let target = self.database().parse_commit(&target_oid)?;
        let (_, head) = self.head_commit()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate(head.snapshot().clone())?;

        self.restore_snapshot(&stage, target.snapshot())?;

        self.refs().advance(&target_oid)?;
        stage.reset_to(target.snapshot().clone())?;

        Ok(())
    }
}
