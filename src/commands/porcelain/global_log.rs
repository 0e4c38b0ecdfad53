use crate::areas::repository::Repository;
use std::cmp::Reverse;

impl Repository {
    /// Display every stored commit, newest first
    ///
    /// Commits sharing a timestamp are ordered by digest.
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut commits = self
            .database()
            .list_commits()?
            .into_iter()
            .map(|oid| {
                let commit = self.database().parse_commit(&oid)?;
                Ok((oid, commit))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        commits.sort_by(|(left_oid, left), (right_oid, right)| {
            (Reverse(left.timestamp()), left_oid).cmp(&(Reverse(right.timestamp()), right_oid))
        });

        for (oid, commit) in &commits {
            self.display_commit(oid, commit)?;
        }

        Ok(())
    }
}
