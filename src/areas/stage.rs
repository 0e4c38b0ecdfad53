//! Staging area
//!
//! The staging area holds the changes that will go into the next commit. Only the delta against
//! the HEAD commit is persisted: paths staged with new content and paths marked for removal.
//! The full tree of the next commit is rebuilt on demand as
//! `head.tracked + added - removed`.
//!
//! The stage is reloaded from disk at the start of every operation that needs it and the file is
//! deleted once the delta becomes empty, so a missing file simply means "nothing staged".

use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::stage::checksum::Checksum;
use crate::artifacts::stage::stage_entry::StageEntry;
use crate::artifacts::stage::stage_header::StageHeader;
use crate::artifacts::stage::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::SprigError;
use anyhow::{Context, anyhow};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// What `remove` did to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalKind {
    /// The path was only staged; its stage entry was dropped
    Unstaged,
    /// The path is tracked by HEAD and is now marked for removal
    Removed,
}

#[derive(Debug, Clone)]
pub struct StagingArea {
    /// Path to the stage file (typically `.sprig/stage`)
    path: Box<Path>,
    /// Snapshot of the HEAD commit the delta is relative to
    head: Snapshot,
    added: BTreeMap<PathBuf, ObjectId>,
    removed: BTreeSet<PathBuf>,
    /// Flag indicating if the delta has been modified since loading
    changed: bool,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea {
            path,
            head: Snapshot::default(),
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the commit the staged delta applies to
    pub fn head(&self) -> &Snapshot {
        &self.head
    }

    pub fn added(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<PathBuf> {
        &self.removed
    }

    pub fn is_removed(&self, path: &Path) -> bool {
        self.removed.contains(path)
    }

    /// Number of entries that differ from the HEAD snapshot
    pub fn size(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.size() == 0
    }

    /// Digest of the content the next commit would record for `path`
    pub fn tracked_blob(&self, path: &Path) -> Option<&ObjectId> {
        if self.removed.contains(path) {
            return None;
        }

        self.added.get(path).or_else(|| self.head.blob_for(path))
    }

    /// Full tree the next commit would record
    pub fn tracked(&self) -> BTreeMap<PathBuf, ObjectId> {
        let mut tracked = self.head.tracked().clone();
        tracked.extend(
            self.added
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone())),
        );
        tracked.retain(|path, _| !self.removed.contains(path));

        tracked
    }

    /// Snapshot to record in the next commit
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::new(self.tracked(), self.removed.clone())
    }

    /// Load the staged delta from disk on top of the given HEAD snapshot
    ///
    /// Persisted entries that no longer describe a change against `head` are dropped, so the
    /// delta stays minimal even if HEAD moved underneath it.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the stage file during reading.
    pub fn rehydrate(&mut self, head: Snapshot) -> anyhow::Result<()> {
        self.head = head;
        self.added.clear();
        self.removed.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let mut stage_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("Unable to open stage file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut stage_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let header = Self::parse_header(&mut reader)?;

        for _ in 0..header.added_count {
            if let StageEntry::Added { path, oid } = StageEntry::read_added(&mut reader)? {
                self.added.insert(path, oid);
            }
        }
        for _ in 0..header.removed_count {
            if let StageEntry::Removed { path } = StageEntry::read_removed(&mut reader)? {
                self.removed.insert(path);
            }
        }

        reader.verify()?;

        let head = &self.head;
        self.added
            .retain(|path, oid| head.blob_for(path) != Some(&*oid));
        self.removed.retain(|path| head.is_tracked(path));

        Ok(())
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<StageHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = StageHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid stage file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported stage file version: {}",
                header.version
            ));
        }

        Ok(header)
    }

    /// Stage `oid` as the new content of `path`
    ///
    /// Cancels a pending removal of the path. When HEAD already tracks identical content the
    /// stage entry is dropped instead, since there is nothing left to commit for it.
    pub fn add(&mut self, path: PathBuf, oid: ObjectId) {
        self.removed.remove(&path);

        if self.head.blob_for(&path) == Some(&oid) {
            self.added.remove(&path);
        } else {
            self.added.insert(path, oid);
        }

        self.changed = true;
    }

    /// Unstage `path` and, if HEAD tracks it, mark it for removal
    ///
    /// Deleting the working file is left to the caller.
    pub fn remove(&mut self, path: &Path) -> anyhow::Result<RemovalKind> {
        let staged = self.added.contains_key(path);
        let tracked_by_head = self.head.is_tracked(path);

        if !staged && !tracked_by_head {
            return Err(SprigError::NothingToRemove.into());
        }

        self.added.remove(path);
        self.changed = true;

        if tracked_by_head {
            self.removed.insert(path.to_path_buf());
            Ok(RemovalKind::Removed)
        } else {
            Ok(RemovalKind::Unstaged)
        }
    }

    /// Drop every pending change and delete the stage file
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.added.clear();
        self.removed.clear();
        self.changed = true;

        self.write_updates()
    }

    /// Reset the delta on top of a new HEAD snapshot and delete the stage file
    pub fn reset_to(&mut self, head: Snapshot) -> anyhow::Result<()> {
        self.head = head;
        self.clear()
    }

    /// Persist the staged delta if it changed since loading
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the stage file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        if self.is_clean() {
            if self.path.exists() {
                std::fs::remove_file(self.path()).with_context(|| {
                    format!("Unable to remove stage file {}", self.path.display())
                })?;
            }
            self.changed = false;
            return Ok(());
        }

        let mut stage_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("Unable to open stage file {}", self.path.display()))?;
        let lock = file_guard::lock(&mut stage_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header = StageHeader::with_counts(
            u32::try_from(self.added.len())?,
            u32::try_from(self.removed.len())?,
        );
        writer.write(&header.serialize()?)?;

        for (path, oid) in &self.added {
            let entry = StageEntry::Added {
                path: path.clone(),
                oid: oid.clone(),
            };
            writer.write(&entry.serialize()?)?;
        }
        for path in &self.removed {
            let entry = StageEntry::Removed { path: path.clone() };
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }
}
