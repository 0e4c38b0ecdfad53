//! Commit graph navigation and split-point finding
//!
//! Commits form a DAG: regular commits have one parent, merge commits two, and every history
//! ends in the shared root commit. This module answers three questions over that graph:
//!
//! - `ancestors_of`: every commit reachable through parent links, the start included
//! - `distance`: length of the shortest parent chain from one commit down to another
//! - `find_split_point`: the latest common ancestor of two branch heads
//!
//! ## Split Point Algorithm
//!
//! 1. Mark every ancestor of the current head with `CURRENT` and every ancestor of the target
//!    head with `TARGET`; commits carrying both flags are the common ancestors.
//! 2. If the target head is itself a common ancestor, it is already merged. If the current head
//!    is, the merge degenerates into a fast-forward.
//! 3. Otherwise mark every proper ancestor of a common ancestor as `STALE`. The common ancestors
//!    left unmarked are the latest ones: none of them is an ancestor of another.
//! 4. Pick the candidate closest to the current head, breaking exact ties with the smallest
//!    digest so the result never depends on traversal order.
//!
//! All traversals use explicit work-lists; parent lists are memoized so each commit is read from
//! the store at most once per graph.
//!
//! ## Debug Logging
//!
//! Build with `--features debug_graph` to trace the visit states and the candidates considered.

use crate::artifacts::objects::commit::{Parents, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b000;
        const CURRENT = 0b001;
        const TARGET = 0b010;
        const COMMON = Self::CURRENT.bits() | Self::TARGET.bits();
        const STALE = 0b100;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Length of the shortest parent chain between two commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Distance {
    Finite(usize),
    /// The destination is not an ancestor of the start
    Infinite,
}

/// Outcome of looking for the base of a merge of `target` into `current`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitPoint {
    /// The target head is an ancestor of (or equal to) the current head
    AlreadyMerged(ObjectId),
    /// The current head is an ancestor of the target head
    FastForward(ObjectId),
    /// Latest common ancestor of two diverged heads
    Base(ObjectId),
}

impl SplitPoint {
    pub fn oid(&self) -> &ObjectId {
        match self {
            SplitPoint::AlreadyMerged(oid) | SplitPoint::FastForward(oid) | SplitPoint::Base(oid) => {
                oid
            }
        }
    }
}

/// Navigator over the commit DAG
///
/// Generic over the function loading commits, so the same algorithms run against the object
/// database and against in-memory graphs in tests.
pub struct CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
    parents_cache: RefCell<HashMap<ObjectId, Parents>>,
}

impl<CommitLoaderFn> CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            commit_loader,
            parents_cache: RefCell::new(HashMap::new()),
        }
    }

    fn parents_of(&self, commit_id: &ObjectId) -> anyhow::Result<Parents> {
        if let Some(parents) = self.parents_cache.borrow().get(commit_id) {
            return Ok(parents.clone());
        }

        let commit = (self.commit_loader)(commit_id)?;
        self.parents_cache
            .borrow_mut()
            .insert(commit_id.clone(), commit.parents.clone());

        Ok(commit.parents)
    }

    /// Every commit reachable from `commit_id` through parent links, including itself
    pub fn ancestors_of(&self, commit_id: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::new();
        let mut worklist = vec![commit_id.clone()];

        while let Some(commit_id) = worklist.pop() {
            if !ancestors.insert(commit_id.clone()) {
                continue;
            }

            for parent in self.parents_of(&commit_id)?.iter() {
                if !ancestors.contains(parent) {
                    worklist.push(parent.clone());
                }
            }
        }

        Ok(ancestors)
    }

    /// Shortest parent-chain length from `from` to every ancestor of it
    pub fn distances_from(&self, from: &ObjectId) -> anyhow::Result<HashMap<ObjectId, usize>> {
        let mut distances = HashMap::from([(from.clone(), 0)]);
        let mut queue = VecDeque::from([from.clone()]);

        // breadth-first, so the first distance recorded for a commit is the shortest
        while let Some(commit_id) = queue.pop_front() {
            let next = distances[&commit_id] + 1;

            for parent in self.parents_of(&commit_id)?.iter() {
                if !distances.contains_key(parent) {
                    distances.insert(parent.clone(), next);
                    queue.push_back(parent.clone());
                }
            }
        }

        Ok(distances)
    }

    pub fn distance(&self, from: &ObjectId, to: &ObjectId) -> anyhow::Result<Distance> {
        Ok(self
            .distances_from(from)?
            .get(to)
            .map_or(Distance::Infinite, |distance| Distance::Finite(*distance)))
    }

    /// Find the base for merging `target` into `current`
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<SplitPoint> {
        let mut states = HashMap::<ObjectId, VisitState>::new();
        for (head, flag) in [(current, VisitState::CURRENT), (target, VisitState::TARGET)] {
            for ancestor in self.ancestors_of(head)? {
                *states.entry(ancestor).or_insert(VisitState::NONE) |= flag;
            }
        }

        let common = states
            .iter()
            .filter(|(_, state)| state.contains(VisitState::COMMON))
            .map(|(oid, _)| oid.clone())
            .collect::<HashSet<_>>();

        if common.contains(target) {
            debug_log!("{} is already reachable from {}", target, current);
            return Ok(SplitPoint::AlreadyMerged(target.clone()));
        }
        if common.contains(current) {
            debug_log!("{} can be fast-forwarded to {}", current, target);
            return Ok(SplitPoint::FastForward(current.clone()));
        }

        // a common ancestor reachable from another common ancestor is never the latest one
        let mut worklist = Vec::new();
        for oid in &common {
            worklist.extend(self.parents_of(oid)?.iter().cloned());
        }
        while let Some(oid) = worklist.pop() {
            let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::STALE) {
                continue;
            }
            *state |= VisitState::STALE;
            worklist.extend(self.parents_of(&oid)?.iter().cloned());
        }

        debug_log!(
            "Visit states: {}",
            states
                .iter()
                .map(|(oid, state)| format!("{}: {}", oid.to_short_oid(), state))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let candidates = common
            .into_iter()
            .filter(|oid| !states[oid].contains(VisitState::STALE))
            .collect::<Vec<_>>();

        debug_log!(
            "Latest common ancestors: {}",
            candidates
                .iter()
                .map(|oid| oid.as_ref())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let distances = self.distances_from(current)?;
        candidates
            .into_iter()
            .min_by(|left, right| {
                let left_distance = distances.get(left).copied().unwrap_or(usize::MAX);
                let right_distance = distances.get(right).copied().unwrap_or(usize::MAX);
                left_distance.cmp(&right_distance).then_with(|| left.cmp(right))
            })
            .map(SplitPoint::Base)
            .ok_or_else(|| anyhow::anyhow!("{current} and {target} share no history"))
    }
}
