//! Repository error taxonomy
//!
//! Every failure the engine detects on purpose is one of these kinds. They are raised through
//! `anyhow` like any other error, so callers that need to branch on the kind can use
//! `error.downcast_ref::<SprigError>()`. I/O and decoding problems are never mapped into this
//! enum; they surface as plain `anyhow` errors with context attached.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SprigError {
    #[error("Not in an initialized sprig directory.")]
    RepositoryNotInitialized,

    #[error("A sprig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Incorrect operands.")]
    InvalidOperands,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("No commit with that id exists.")]
    UnknownCommit,

    #[error("Commit id {0} is ambiguous.")]
    AmbiguousCommit(String),

    #[error("A branch with that name does not exist.")]
    UnknownBranch,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("Cannot merge a branch with itself.")]
    CannotMergeSelf,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInWay(Vec<PathBuf>),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("Object {0} not found in the store.")]
    ObjectNotFound(String),
}

/// Check whether an `anyhow` error carries the given repository error kind
pub fn is_kind(error: &anyhow::Error, kind: &SprigError) -> bool {
    error
        .downcast_ref::<SprigError>()
        .is_some_and(|found| std::mem::discriminant(found) == std::mem::discriminant(kind))
}
