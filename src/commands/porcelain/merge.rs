use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::ActionType;
use crate::artifacts::merge::commit_graph::{CommitGraph, SplitPoint};
use crate::artifacts::merge::conflict::conflict_blob;
use crate::artifacts::merge::three_way::MergePlan;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, Parents};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SprigError;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

pub const ALREADY_MERGED_NOTICE: &str = "Given branch is an ancestor of the current branch.";
pub const FAST_FORWARD_NOTICE: &str = "Current branch fast-forwarded.";
pub const CONFLICT_NOTICE: &str = "Encountered a merge conflict.";

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target branch was already part of the current history
    AlreadyUpToDate,
    /// The current branch moved forward to the target head
    FastForwarded(ObjectId),
    /// A two-parent merge commit was recorded
    Merged {
        commit: ObjectId,
        conflicts: Vec<PathBuf>,
    },
}

impl Repository {
    pub async fn merge(&mut self, target: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_initialized()?;

        let (head_oid, head) = self.head_commit()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate(head.snapshot().clone())?;

        if !stage.is_clean() {
            return Err(SprigError::UncommittedChanges.into());
        }

        let target_branch =
            BranchName::try_parse(target.to_string()).map_err(|_| SprigError::UnknownBranch)?;
        let target_oid = self
            .refs()
            .read_branch(&target_branch)?
            .ok_or(SprigError::UnknownBranch)?;

        let current_branch = self.refs().current_branch()?;
        if current_branch == target_branch {
            return Err(SprigError::CannotMergeSelf.into());
        }

        let split_point = {
            let database = self.database();
            let graph = CommitGraph::new(|oid: &ObjectId| database.slim_commit(oid));
            graph.find_split_point(&head_oid, &target_oid)?
        };

        match split_point {
            SplitPoint::AlreadyMerged(_) => {
                writeln!(self.writer(), "{ALREADY_MERGED_NOTICE}")?;
                Ok(MergeOutcome::AlreadyUpToDate)
            }
            SplitPoint::FastForward(_) => {
                let target = self.database().parse_commit(&target_oid)?;

                self.restore_snapshot(&stage, target.snapshot())?;
                self.refs().advance(&target_oid)?;
                stage.reset_to(target.snapshot().clone())?;

                writeln!(self.writer(), "{FAST_FORWARD_NOTICE}")?;
                Ok(MergeOutcome::FastForwarded(target_oid))
            }
            SplitPoint::Base(base_oid) => {
                let base = self.database().parse_commit(&base_oid)?;
                let target = self.database().parse_commit(&target_oid)?;
                let plan = MergePlan::new(base.snapshot(), head.snapshot(), target.snapshot());

                let conflict_blobs = self.render_conflicts(&plan)?;
                let conflict_oids = conflict_blobs
                    .iter()
                    .map(|(path, blob)| Ok((path.clone(), blob.object_id()?)))
                    .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

                let migration = plan.migration(head.snapshot(), &conflict_oids)?;
                migration.check_untracked(self.workspace(), stage.head())?;

                for blob in conflict_blobs.values() {
                    self.database().store(blob)?;
                }
                self.workspace().apply_migration(&migration, self.database())?;

                for (path, oid) in migration.written_paths() {
                    stage.add(path.to_path_buf(), oid.clone());
                }
                for (path, _) in migration.actions(ActionType::Delete) {
                    stage.remove(path)?;
                }

                let commit = Commit::new(
                    Parents::Merge(head_oid, target_oid),
                    Commit::load_timestamp_from_env(),
                    format!("Merged {target_branch} into {current_branch}."),
                    stage.to_snapshot(),
                );
                let commit_id = self.write_commit(&commit)?;
                stage.reset_to(commit.snapshot().clone())?;

                let conflicts = conflict_blobs.into_keys().collect::<Vec<_>>();
                if !conflicts.is_empty() {
                    writeln!(self.writer(), "{CONFLICT_NOTICE}")?;
                }

                Ok(MergeOutcome::Merged {
                    commit: commit_id,
                    conflicts,
                })
            }
        }
    }

    /// Conflict-marked blob for every conflicting path of the plan
    fn render_conflicts(&self, plan: &MergePlan) -> anyhow::Result<BTreeMap<PathBuf, Blob>> {
        plan.conflicts()
            .map(|(path, current, target)| {
                let current = current
                    .map(|oid| self.database().parse_blob(oid))
                    .transpose()?;
                let target = target
                    .map(|oid| self.database().parse_blob(oid))
                    .transpose()?;

                Ok((
                    path.to_path_buf(),
                    conflict_blob(current.as_ref(), target.as_ref()),
                ))
            })
            .collect()
    }
}
