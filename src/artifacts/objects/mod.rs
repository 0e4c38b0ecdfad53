//! Stored object types
//!
//! The store holds two kinds of immutable objects, both identified by the SHA-1 digest of their
//! canonical encoding:
//!
//! - **Blob**: file content (raw bytes)
//! - **Commit**: snapshot of tracked paths with message, timestamp and parent digests
//!
//! Every encoding starts with the `<type> <size>\0` header.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated digests shown in log output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
