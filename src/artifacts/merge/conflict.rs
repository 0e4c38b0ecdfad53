//! Conflict markers
//!
//! A path changed differently on both sides of a merge is replaced by a file holding both
//! versions:
//!
//! ```text
//! <<<<<<< HEAD
//! <current side content, empty if deleted>=======
//! <target side content, empty if deleted>>>>>>>>
//! ```
//!
//! Contents are copied verbatim, so a side that ends with a newline puts the next marker on a
//! line of its own. The closing marker is not followed by a newline.

use crate::artifacts::objects::blob::Blob;
use bytes::Bytes;

pub const CURRENT_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &str = "=======\n";
pub const TARGET_MARKER: &str = ">>>>>>>";

/// Render the conflict-marked content for one path
pub fn render_conflict(current: Option<&[u8]>, target: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let target = target.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CURRENT_MARKER.len() + current.len() + SEPARATOR_MARKER.len() + target.len() + TARGET_MARKER.len(),
    );
    content.extend_from_slice(CURRENT_MARKER.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(SEPARATOR_MARKER.as_bytes());
    content.extend_from_slice(target);
    content.extend_from_slice(TARGET_MARKER.as_bytes());

    Bytes::from(content)
}

/// Conflict-marked blob built from the two sides of a merge
pub fn conflict_blob(current: Option<&Blob>, target: Option<&Blob>) -> Blob {
    Blob::new(render_conflict(
        current.map(|blob| blob.content().as_ref()),
        target.map(|blob| blob.content().as_ref()),
    ))
}
