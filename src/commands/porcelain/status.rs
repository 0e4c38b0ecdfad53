use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<StatusInfo> {
        self.ensure_initialized()?;

        let (_, head) = self.head_commit()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate(head.snapshot().clone())?;

        let status_info = self.status_report().initialize(&stage)?;
        write!(self.writer(), "{status_info}")?;

        Ok(status_info)
    }
}
