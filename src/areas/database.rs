//! Object database
//!
//! Content-addressed, append-only storage for blobs and commits. Each object lives in
//! `.sprig/<kind>/<digest>` and is written once through a temporary file and an atomic rename.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable, digest_of};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::SprigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

/// Shortest commit id prefix accepted from the user
pub const MIN_COMMIT_PREFIX_LENGTH: usize = 4;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    /// Commits decoded during this invocation, keyed by digest
    commit_cache: RefCell<HashMap<ObjectId, Commit>>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            commit_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn objects_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.dir_name())
    }

    /// Store an object and return its digest
    ///
    /// Storing identical content twice is a no-op returning the same digest.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = digest_of(&object_content);
        let object_path = self.object_path(object.object_type(), &object_id);

        // write the object to disk unless it already exists
        if !object_path.exists() {
            let object_dir = self.objects_path(object.object_type());
            std::fs::create_dir_all(&object_dir).context(format!(
                "Unable to create object directory {}",
                object_dir.display()
            ))?;

            self.write_object(object_path, object_content)?;
        }

        Ok(object_id)
    }

    /// Read the raw canonical encoding of an object
    pub fn load(&self, object_type: ObjectType, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_type, object_id);

        if !object_path.exists() {
            return Err(SprigError::ObjectNotFound(object_id.to_string()).into());
        }

        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(Bytes::from(object_content))
    }

    pub fn parse_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;
        Blob::deserialize(object_reader)
    }

    pub fn parse_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        if let Some(commit) = self.commit_cache.borrow().get(object_id) {
            return Ok(commit.clone());
        }

        let object_reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;
        let commit = Commit::deserialize(object_reader)
            .with_context(|| format!("Unable to decode commit {object_id}"))?;

        self.commit_cache
            .borrow_mut()
            .insert(object_id.clone(), commit.clone());

        Ok(commit)
    }

    pub fn slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(self.parse_commit(object_id)?.slim(object_id.clone()))
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_content = self.load(expected_type, object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!("Object {object_id} is a {object_type}, expected a {expected_type}");
        }

        let body_size = object_reader.get_ref().len() - object_reader.position() as usize;
        if body_size != size {
            anyhow::bail!("Object {object_id} is truncated: expected {size} bytes, found {body_size}");
        }

        Ok(object_reader)
    }

    /// Digests of every stored commit, sorted
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_dir = self.objects_path(ObjectType::Commit);
        if !commits_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut commits = std::fs::read_dir(&commits_dir)
            .with_context(|| format!("Unable to list {}", commits_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| ObjectId::try_parse(entry.file_name().to_string_lossy().into()).ok())
            .collect::<Vec<_>>();
        commits.sort();

        Ok(commits)
    }

    /// Find all commits whose digest starts with the given prefix
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();

        Ok(self
            .list_commits()?
            .into_iter()
            .filter(|oid| oid.as_ref().starts_with(&prefix))
            .collect())
    }

    /// Resolve a full or abbreviated commit id
    ///
    /// Abbreviations must be at least four characters long and match exactly one commit.
    pub fn resolve_commit(&self, revision: &str) -> anyhow::Result<ObjectId> {
        if revision.len() < MIN_COMMIT_PREFIX_LENGTH || !ObjectId::is_valid_prefix(revision) {
            return Err(SprigError::UnknownCommit.into());
        }

        let mut matches = self.find_commits_by_prefix(revision)?;
        match matches.len() {
            0 => Err(SprigError::UnknownCommit.into()),
            1 => Ok(matches.remove(0)),
            _ => Err(SprigError::AmbiguousCommit(revision.to_string()).into()),
        }
    }

    fn object_path(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.objects_path(object_type).join(object_id.as_ref())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
