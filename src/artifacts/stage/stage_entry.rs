use crate::artifacts::core::repo_path;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::stage::checksum::Checksum;
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Size of the path length prefix in bytes
const PATH_LENGTH_SIZE: usize = 2;

/// One pending change recorded in the stage file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEntry {
    Added { path: PathBuf, oid: ObjectId },
    Removed { path: PathBuf },
}

impl StageEntry {
    pub fn path(&self) -> &Path {
        match self {
            StageEntry::Added { path, .. } | StageEntry::Removed { path } => path,
        }
    }

    pub fn read_added(reader: &mut Checksum) -> anyhow::Result<Self> {
        let oid_bytes = reader.read(OBJECT_ID_LENGTH / 2)?;
        let oid = ObjectId::read_h40_from(&mut &oid_bytes[..])?;
        let path = Self::read_path(reader)?;

        Ok(StageEntry::Added { path, oid })
    }

    pub fn read_removed(reader: &mut Checksum) -> anyhow::Result<Self> {
        let path = Self::read_path(reader)?;

        Ok(StageEntry::Removed { path })
    }

    fn read_path(reader: &mut Checksum) -> anyhow::Result<PathBuf> {
        let length = NetworkEndian::read_u16(&reader.read(PATH_LENGTH_SIZE)?) as usize;
        let path = String::from_utf8(reader.read(length)?.to_vec())
            .map_err(|_| anyhow::anyhow!("Invalid path encoding in stage entry"))?;

        Ok(repo_path::from_slash(&path))
    }

    fn write_path(bytes: &mut Vec<u8>, path: &Path) -> anyhow::Result<()> {
        let encoded = repo_path::to_slash(path)?;
        let length = u16::try_from(encoded.len())
            .map_err(|_| anyhow::anyhow!("path {:?} is too long to stage", path))?;

        bytes.write_u16::<NetworkEndian>(length)?;
        bytes.extend_from_slice(encoded.as_bytes());

        Ok(())
    }
}

impl Packable for StageEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();

        match self {
            StageEntry::Added { path, oid } => {
                oid.write_h40_to(&mut bytes)?;
                Self::write_path(&mut bytes, path)?;
            }
            StageEntry::Removed { path } => Self::write_path(&mut bytes, path)?,
        }

        Ok(Bytes::from(bytes))
    }
}
