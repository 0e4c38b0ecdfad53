//! Working tree status inspection
//!
//! Status compares three things: the HEAD snapshot, the staging area on top of it, and the
//! working directory.
//!
//! ## Components
//!
//! - `file_change`: change categories for tracked files
//! - `inspector`: per-file comparison of the working directory against the tracked content
//! - `status_info`: status report aggregation and rendering

pub mod file_change;
pub mod inspector;
pub mod status_info;
