//! Staging area file format
//!
//! The stage file records the pending delta against the HEAD commit. It is absent while the
//! staging area is clean.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "STAG" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Added entry count (4 bytes)
//!   - Removed entry count (4 bytes)
//!
//! Added entries:
//!   - Blob digest (20 bytes)
//!   - Path length (2 bytes) followed by the `/`-separated path
//!
//! Removed entries:
//!   - Path length (2 bytes) followed by the `/`-separated path
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod stage_entry;
pub mod stage_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the stage header in bytes
pub const HEADER_SIZE: usize = 16;

/// Magic signature identifying stage files
pub const SIGNATURE: &str = "STAG";

/// Stage file format version
pub const VERSION: u32 = 1;
