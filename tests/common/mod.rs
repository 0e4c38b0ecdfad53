#![allow(dead_code)]

pub mod command;

/// Commit timestamp pinned for every command run by the tests
pub const COMMIT_DATE: &str = "2024-01-01 12:00:00 +0000";
