//! References (HEAD, current branch, branch pointers)
//!
//! References are small text files under `.sprig/`:
//!
//! - `HEAD`: digest of the commit currently checked out
//! - `current-branch`: name of the active branch
//! - `branches/<name>`: digest of the branch tip; hierarchical names become nested files
//!
//! HEAD and the current branch are kept as two separate pieces of state. Committing, resetting
//! and fast-forwarding move both; checking out a branch rewrites both as well.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SprigError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the HEAD reference file
pub const HEAD_REF_NAME: &str = "HEAD";

/// Name of the file holding the active branch name
pub const CURRENT_BRANCH_REF_NAME: &str = "current-branch";

/// Directory holding the branch pointers
pub const BRANCHES_DIR_NAME: &str = "branches";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository state directory (typically `.sprig`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn current_branch_path(&self) -> PathBuf {
        self.path.join(CURRENT_BRANCH_REF_NAME)
    }

    pub fn branches_path(&self) -> PathBuf {
        self.path.join(BRANCHES_DIR_NAME)
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.branches_path().join(name.as_ref())
    }

    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        Self::read_oid_file(&self.head_path())
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), oid.as_ref())
    }

    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let path = self.current_branch_path();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read current branch at {:?}", path))?;

        BranchName::try_parse(content.trim().to_string())
    }

    pub fn set_current_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(&self.current_branch_path(), name.as_ref())
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == name)
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Read the tip of a branch, `None` if no such branch exists
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let path = self.branch_path(name);

        if !path.is_file() {
            return Ok(None);
        }

        Ok(Some(Self::read_oid_file(&path)?))
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        if branch_path.is_file() {
            return Err(SprigError::BranchAlreadyExists.into());
        }

        // a branch file cannot double as the directory of a hierarchical name and vice versa
        let clashes_with_prefix = name
            .as_ref()
            .match_indices('/')
            .any(|(index, _)| self.branches_path().join(&name.as_ref()[..index]).is_file());
        if branch_path.is_dir() || clashes_with_prefix {
            anyhow::bail!("branch {} conflicts with an existing branch", name);
        }

        self.update_ref_file(&branch_path, source_oid.as_ref())
    }

    /// Point an existing or new branch at `oid`
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.branch_path(name), oid.as_ref())
    }

    /// Move the current branch and HEAD to `oid`
    pub fn advance(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_branch(&self.current_branch()?, oid)?;
        self.update_head(oid)
    }

    /// Delete a branch pointer, leaving its commits untouched
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);

        let oid = self
            .read_branch(name)?
            .ok_or(SprigError::UnknownBranch)?;

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;

        Ok(oid)
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let branches_path = self.branches_path();

        let mut branches = WalkDir::new(&branches_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&branches_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn read_oid_file(path: &Path) -> anyhow::Result<ObjectId> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;

        ObjectId::try_parse(content.trim().to_string())
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.branches_path()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
