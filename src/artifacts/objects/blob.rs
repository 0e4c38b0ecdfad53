//! Blob object
//!
//! Blobs store file content. They hold only raw bytes; the path a blob was staged from is
//! remembered in memory for diagnostics but never encoded, so identical content always maps to
//! the same digest no matter which file it came from.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::io::BufRead;

/// Immutable file content, identified by its digest
#[derive(Debug, Clone)]
pub struct Blob {
    content: Bytes,
    source_name: Option<String>,
}

impl Blob {
    pub fn new(content: impl Into<Bytes>) -> Self {
        Blob {
            content: content.into(),
            source_name: None,
        }
    }

    /// Create a blob remembering the file it was read from
    pub fn from_file(content: impl Into<Bytes>, source_name: String) -> Self {
        Blob {
            content: content.into(),
            source_name: Some(source_name),
        }
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}

impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Eq for Blob {}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(with_header(self.object_type(), &self.content))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}
