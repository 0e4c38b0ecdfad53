use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::stage::{HEADER_SIZE, SIGNATURE, VERSION};
use anyhow::anyhow;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StageHeader {
    pub marker: String,
    pub version: u32,
    pub added_count: u32,
    pub removed_count: u32,
}

impl StageHeader {
    pub fn with_counts(added_count: u32, removed_count: u32) -> Self {
        StageHeader {
            marker: String::from(SIGNATURE),
            version: VERSION,
            added_count,
            removed_count,
        }
    }
}

impl Packable for StageHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<NetworkEndian>(self.version)?;
        bytes.write_u32::<NetworkEndian>(self.added_count)?;
        bytes.write_u32::<NetworkEndian>(self.removed_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StageHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut marker = [0u8; 4];
        reader
            .read_exact(&mut marker)
            .map_err(|_| anyhow!("Invalid stage header size"))?;
        let marker = String::from_utf8(marker.to_vec())
            .map_err(|_| anyhow!("Invalid marker in stage header"))?;

        let version = reader.read_u32::<NetworkEndian>()?;
        let added_count = reader.read_u32::<NetworkEndian>()?;
        let removed_count = reader.read_u32::<NetworkEndian>()?;

        Ok(StageHeader {
            marker,
            version,
            added_count,
            removed_count,
        })
    }
}
