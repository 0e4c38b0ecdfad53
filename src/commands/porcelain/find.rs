use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SprigError;
use std::io::Write;

impl Repository {
    /// Print the digest of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        self.ensure_initialized()?;

        let mut matches = Vec::new();
        for oid in self.database().list_commits()? {
            if self.database().parse_commit(&oid)?.message() == message {
                matches.push(oid);
            }
        }

        if matches.is_empty() {
            return Err(SprigError::NoCommitWithMessage.into());
        }

        for oid in &matches {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(matches)
    }
}
