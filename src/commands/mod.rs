//! Command implementations
//!
//! - `porcelain`: User-facing version control operations (add, commit, merge, etc.)

pub mod porcelain;
