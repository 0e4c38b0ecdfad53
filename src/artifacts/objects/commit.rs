//! Commit object
//!
//! Commits are immutable snapshots of the tracked paths. They contain:
//! - Zero, one or two parent digests (root, regular and merge commits)
//! - A logical timestamp with its UTC offset
//! - The full path -> blob mapping plus the paths removed since the first parent
//! - A message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! format 1
//! timestamp <unix-seconds> <+hhmm>
//! parent <digest>              (0, 1 or 2 lines, first parent first)
//! file <blob-digest> <path>    (sorted by path)
//! removed <path>               (sorted)
//!
//! <message>
//! ```
//!
//! Field order is fixed and paths are `/`-separated, so the digest is a pure function of the
//! message, timestamp, parents and snapshot.

use crate::artifacts::core::repo_path;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Version tag written as the first line of every commit body
pub const COMMIT_FORMAT_VERSION: u32 = 1;

/// Message of the root commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable pinning the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "SPRIG_COMMIT_DATE";

/// Parent links of a commit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parents {
    /// The root commit created by `init`
    Root,
    Single(ObjectId),
    /// First parent is the branch merged into, second the branch merged in
    Merge(ObjectId, ObjectId),
}

impl Parents {
    pub fn first(&self) -> Option<&ObjectId> {
        match self {
            Parents::Root => None,
            Parents::Single(parent) | Parents::Merge(parent, _) => Some(parent),
        }
    }

    pub fn second(&self) -> Option<&ObjectId> {
        match self {
            Parents::Merge(_, parent) => Some(parent),
            Parents::Root | Parents::Single(_) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.first().into_iter().chain(self.second())
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Parents::Merge(_, _))
    }

    fn from_ids(mut ids: Vec<ObjectId>) -> anyhow::Result<Self> {
        match ids.len() {
            0 => Ok(Parents::Root),
            1 => Ok(Parents::Single(ids.remove(0))),
            2 => {
                let second = ids.remove(1);
                Ok(Parents::Merge(ids.remove(0), second))
            }
            count => anyhow::bail!("Invalid commit object: {count} parent lines"),
        }
    }
}

/// Tracked state recorded by a commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Every tracked path mapped to the digest of its content
    tracked: BTreeMap<PathBuf, ObjectId>,
    /// Paths tracked by the first parent and removed by this commit
    removed: BTreeSet<PathBuf>,
}

impl Snapshot {
    pub fn new(tracked: BTreeMap<PathBuf, ObjectId>, removed: BTreeSet<PathBuf>) -> Self {
        Snapshot { tracked, removed }
    }

    pub fn tracked(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.tracked
    }

    pub fn removed(&self) -> &BTreeSet<PathBuf> {
        &self.removed
    }

    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.tracked.get(path)
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.tracked.contains_key(path)
    }
}

/// Lightweight view of a commit used by graph traversals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Parents,
    pub timestamp: DateTime<FixedOffset>,
}

/// Immutable repository snapshot with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    parents: Parents,
    timestamp: DateTime<FixedOffset>,
    message: String,
    snapshot: Snapshot,
}

impl Commit {
    pub fn new(
        parents: Parents,
        timestamp: DateTime<FixedOffset>,
        message: String,
        snapshot: Snapshot,
    ) -> Self {
        Commit {
            parents,
            timestamp,
            message,
            snapshot,
        }
    }

    /// The parentless commit at the Unix epoch every repository shares
    pub fn root() -> Self {
        Commit {
            parents: Parents::Root,
            timestamp: DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            message: ROOT_COMMIT_MESSAGE.to_string(),
            snapshot: Snapshot::default(),
        }
    }

    /// Timestamp for a new commit
    ///
    /// Reads `SPRIG_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls back to the
    /// local clock when it is unset or unparsable.
    pub fn load_timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date| parse_commit_date(&date))
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Nov 9 20:00:05 2017 -0800"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.clone(),
            timestamp: self.timestamp,
        }
    }

    fn body_lines(&self) -> anyhow::Result<Vec<String>> {
        let mut lines = vec![
            format!("format {COMMIT_FORMAT_VERSION}"),
            format!(
                "timestamp {} {}",
                self.timestamp.timestamp(),
                self.timestamp.format("%z")
            ),
        ];

        for parent in self.parents.iter() {
            lines.push(format!("parent {parent}"));
        }
        for (path, oid) in &self.snapshot.tracked {
            lines.push(format!("file {oid} {}", repo_path::to_slash(path)?));
        }
        for path in &self.snapshot.removed {
            lines.push(format!("removed {}", repo_path::to_slash(path)?));
        }

        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(lines)
    }
}

/// Parse a user-supplied commit date
pub fn parse_commit_date(date: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .ok()
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = self.body_lines()?.join("\n");

        Ok(with_header(self.object_type(), body.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.lines();

        let format_line = lines
            .next()
            .context("Invalid commit object: missing format line")?;
        if format_line != format!("format {COMMIT_FORMAT_VERSION}") {
            anyhow::bail!("Unsupported commit format: {format_line}");
        }

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = DateTime::parse_from_str(timestamp, "%s %z")
            .with_context(|| format!("Invalid commit timestamp: {timestamp}"))?;

        let mut parents = Vec::new();
        let mut tracked = BTreeMap::new();
        let mut removed = BTreeSet::new();

        for line in lines {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                tracked.insert(
                    repo_path::from_slash(path),
                    ObjectId::try_parse(oid.to_string())?,
                );
            } else if let Some(path) = line.strip_prefix("removed ") {
                removed.insert(repo_path::from_slash(path));
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        Ok(Commit {
            parents: Parents::from_ids(parents)?,
            timestamp,
            message: message.to_string(),
            snapshot: Snapshot::new(tracked, removed),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body_lines()
            .map(|lines| lines.join("\n"))
            .unwrap_or_default()
    }
}
