//! Data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `checkout`: Working-tree migration planning and untracked-file detection
//! - `core`: Shared utilities (pager wrapper, repository-relative paths)
//! - `merge`: Commit graph navigation, split points and three-way merge planning
//! - `objects`: Stored object types (blob, commit) and their encodings
//! - `stage`: Staging-area file encoding
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod merge;
pub mod objects;
pub mod stage;
pub mod status;
