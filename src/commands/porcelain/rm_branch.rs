use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::SprigError;

impl Repository {
    /// Delete a branch pointer; the commits it pointed at stay in the store
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name =
            BranchName::try_parse(branch_name.to_string()).map_err(|_| SprigError::UnknownBranch)?;

        if !self.refs().branch_exists(&branch_name) {
            return Err(SprigError::UnknownBranch.into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(SprigError::CannotRemoveCurrentBranch.into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
