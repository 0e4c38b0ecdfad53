use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::SprigError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(SprigError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path(ObjectType::Blob))
            .context("Failed to create .sprig/blobs directory")?;

        fs::create_dir_all(self.database().objects_path(ObjectType::Commit))
            .context("Failed to create .sprig/commits directory")?;

        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .sprig/branches directory")?;

        let root_oid = self
            .database()
            .store(&Commit::root())
            .context("Failed to store the root commit")?;

        let default_branch = BranchName::default_branch();
        self.refs().create_branch(&default_branch, &root_oid)?;
        self.refs().set_current_branch(&default_branch)?;
        self.refs()
            .update_head(&root_oid)
            .context("Failed to create initial HEAD reference")?;

        writeln!(
            self.writer(),
            "Initialized empty sprig repository in {}",
            self.state_path().display()
        )?;

        Ok(())
    }
}
