//! sprig: a minimal single-user version-control engine
//!
//! - `areas`: persistent repository state (object store, stage, refs, working directory)
//! - `artifacts`: object encodings, commit graph navigation, merge and checkout planning
//! - `commands`: the user-facing operations, one `impl Repository` block each
//! - `errors`: the repository error taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
