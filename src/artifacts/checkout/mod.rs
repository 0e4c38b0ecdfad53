//! Checkout planning
//!
//! Switching the working directory to another snapshot is planned as a `Migration`, checked
//! for untracked files in the way, and only then applied to the workspace.

pub mod migration;
