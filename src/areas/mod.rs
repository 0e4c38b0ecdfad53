//! Core repository components
//!
//! This module contains the persistent areas of a repository:
//!
//! - `database`: Object database for storing blobs and commits
//! - `stage`: Staging area holding the delta for the next commit
//! - `refs`: HEAD, the current branch and branch pointers
//! - `repository`: The context value tying the areas together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod stage;
pub mod workspace;
