use crate::areas::repository::Repository;
use crate::areas::workspace::STATE_DIR_NAME;
use crate::artifacts::core::repo_path;
use crate::errors::SprigError;
use std::path::Path;

impl Repository {
    pub async fn add(&mut self, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = self.resolve_path(file)?;
        if path.starts_with(Path::new(STATE_DIR_NAME)) || !self.workspace().is_file(&path) {
            return Err(SprigError::FileNotFound.into());
        }
        // paths that cannot be encoded in a commit are rejected before anything is stored
        repo_path::to_slash(&path)?;

        let (_, head) = self.head_commit()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate(head.snapshot().clone())?;

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = self.database().store(&blob)?;

        stage.add(path, blob_id);
        stage.write_updates()?;

        Ok(())
    }
}
