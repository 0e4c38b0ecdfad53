//! Porcelain commands (user-facing operations)
//!
//! Each command is an `impl Repository` block that checks every precondition before the first
//! persistent mutation, so a failed command leaves the repository untouched.
//!
//! ## Commands
//!
//! - `init`: Create the state directory, the root commit and the `master` branch
//! - `add` / `rm`: Stage a file's content or its removal
//! - `commit`: Record the staged snapshot
//! - `log` / `global_log` / `find`: Inspect history
//! - `status`: Report branches, staged changes and working-tree differences
//! - `checkout`: Restore a file or switch branches
//! - `branch` / `rm_branch`: Create or delete branch pointers
//! - `reset`: Move the current branch to an arbitrary commit
//! - `merge`: Three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod global_log;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod rm_branch;
pub mod status;
