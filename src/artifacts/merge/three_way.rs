//! Three-way merge planning
//!
//! Each path tracked by the split point or by either head is classified by comparing the blob
//! it maps to on the three sides (`None` when the side does not track it). The planner never
//! reads file contents: conflicts are reported with the blob ids of both sides and the caller
//! renders them.

use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// How one path merges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMerge {
    /// Identical on all three sides
    Unchanged,
    /// Modified, added or deleted on the current side only
    CurrentOnly,
    /// Both sides made the same change, deletions included
    SameInBoth,
    /// Modified or added on the target side only
    TargetChanged(ObjectId),
    /// Deleted on the target side, untouched on the current side
    TargetDeleted,
    /// Both sides changed the path differently
    Conflict {
        current: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

impl FileMerge {
    pub fn classify(
        base: Option<&ObjectId>,
        current: Option<&ObjectId>,
        target: Option<&ObjectId>,
    ) -> Self {
        if current == target {
            if base == current {
                FileMerge::Unchanged
            } else {
                FileMerge::SameInBoth
            }
        } else if base == current {
            match target {
                Some(oid) => FileMerge::TargetChanged(oid.clone()),
                None => FileMerge::TargetDeleted,
            }
        } else if base == target {
            FileMerge::CurrentOnly
        } else {
            FileMerge::Conflict {
                current: current.cloned(),
                target: target.cloned(),
            }
        }
    }

    /// Whether applying the merge touches the working file
    pub fn needs_action(&self) -> bool {
        matches!(
            self,
            FileMerge::TargetChanged(_) | FileMerge::TargetDeleted | FileMerge::Conflict { .. }
        )
    }
}

/// Per-path resolutions of a merge, sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    resolutions: BTreeMap<PathBuf, FileMerge>,
}

impl MergePlan {
    pub fn new(base: &Snapshot, current: &Snapshot, target: &Snapshot) -> Self {
        let paths = base
            .tracked()
            .keys()
            .chain(current.tracked().keys())
            .chain(target.tracked().keys())
            .collect::<BTreeSet<_>>();

        let resolutions = paths
            .into_iter()
            .map(|path| {
                let resolution = FileMerge::classify(
                    base.blob_for(path),
                    current.blob_for(path),
                    target.blob_for(path),
                );
                debug_log!("merge {:?}: {:?}", path, resolution);

                (path.clone(), resolution)
            })
            .collect();

        MergePlan { resolutions }
    }

    pub fn resolutions(&self) -> &BTreeMap<PathBuf, FileMerge> {
        &self.resolutions
    }

    pub fn resolution(&self, path: &Path) -> Option<&FileMerge> {
        self.resolutions.get(path)
    }

    /// Conflicting paths with the blob each side holds
    pub fn conflicts(&self) -> impl Iterator<Item = (&Path, Option<&ObjectId>, Option<&ObjectId>)> {
        self.resolutions
            .iter()
            .filter_map(|(path, resolution)| match resolution {
                FileMerge::Conflict { current, target } => {
                    Some((path.as_path(), current.as_ref(), target.as_ref()))
                }
                _ => None,
            })
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }

    /// Working-tree changes applying the merge on top of `current`
    ///
    /// `conflict_blobs` maps each conflicting path to the blob holding its conflict-marked
    /// content; a conflict missing from it is an error.
    pub fn migration(
        &self,
        current: &Snapshot,
        conflict_blobs: &BTreeMap<PathBuf, ObjectId>,
    ) -> anyhow::Result<Migration> {
        let mut migration = Migration::default();

        for (path, resolution) in self
            .resolutions
            .iter()
            .filter(|(_, resolution)| resolution.needs_action())
        {
            let write_action = if current.is_tracked(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };

            match resolution {
                FileMerge::TargetChanged(oid) => {
                    migration.record(write_action, path.clone(), Some(oid.clone()));
                }
                FileMerge::TargetDeleted => {
                    migration.record(ActionType::Delete, path.clone(), None);
                }
                FileMerge::Conflict { .. } => {
                    let oid = conflict_blobs.get(path).ok_or_else(|| {
                        anyhow::anyhow!("No conflict content prepared for {:?}", path)
                    })?;
                    migration.record(write_action, path.clone(), Some(oid.clone()));
                }
                FileMerge::Unchanged | FileMerge::CurrentOnly | FileMerge::SameInBoth => {}
            }
        }

        Ok(migration)
    }
}
