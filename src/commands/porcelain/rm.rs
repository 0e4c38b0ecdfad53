use crate::areas::repository::Repository;
use crate::areas::stage::RemovalKind;

impl Repository {
    pub async fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = self.resolve_path(file)?;
        let (_, head) = self.head_commit()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate(head.snapshot().clone())?;

        // files only staged stay in the working directory
        if stage.remove(&path)? == RemovalKind::Removed {
            self.workspace().remove_file(&path)?;
        }

        stage.write_updates()?;

        Ok(())
    }
}
