use crate::areas::database::Database;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SprigError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the repository state directory at the workspace root
pub const STATE_DIR_NAME: &str = ".sprig";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every regular file in the working directory, relative to the root and sorted
    ///
    /// The state directory is skipped entirely.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != STATE_DIR_NAME)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Regular files below a working directory, relative to the root
    pub fn files_under(&self, dir_path: &Path) -> Vec<PathBuf> {
        WalkDir::new(self.path.join(dir_path))
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect()
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_dir(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_dir()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    /// Read a working file as a blob remembering its name
    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(file_path)?;
        Ok(Blob::from_file(data, file_path.to_string_lossy().to_string()))
    }

    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directories for: {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a working file if present and prune the directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // blobs are all loaded and directories checked before the first file is touched;
    // deletions run before writes
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> anyhow::Result<()> {
        let blocked = migration.blocking_directories(self);
        if !blocked.is_empty() {
            return Err(SprigError::UntrackedFileInWay(blocked).into());
        }

        let contents = [ActionType::Add, ActionType::Modify]
            .iter()
            .flat_map(|action| migration.actions(*action))
            .filter_map(|(path, oid)| oid.as_ref().map(|oid| (path, oid)))
            .map(|(path, oid)| {
                Self::load_content(database, oid).map(|content| (path.clone(), content))
            })
            .collect::<anyhow::Result<BTreeMap<PathBuf, Bytes>>>()?;

        for (path, _) in migration.actions(ActionType::Delete) {
            self.remove_file(path)?;
        }

        for (path, content) in &contents {
            self.write_file(path, content)?;
        }

        Ok(())
    }

    fn load_content(database: &Database, oid: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(database.parse_blob(oid)?.content().clone())
    }

    /// Path of the repository state directory
    pub fn state_path(&self) -> PathBuf {
        self.path.join(STATE_DIR_NAME)
    }
}
