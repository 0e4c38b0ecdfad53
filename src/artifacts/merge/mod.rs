//! Commit graph navigation and three-way merging
//!
//! - `commit_graph`: ancestors, distances and split-point finding over the commit DAG
//! - `three_way`: per-path classification of a merge and the resulting working-tree plan
//! - `conflict`: conflict-marked file contents

/// Trace graph and merge decisions to stderr when built with the `debug_graph` feature
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_graph")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod commit_graph;
pub mod conflict;
pub mod three_way;
