//! User-facing fatal messages.
//!
//! Every message a user can hit as a hard stop lives here, so the literal
//! wording is defined in exactly one place. Commands return these through
//! `anyhow::Error`; `main` prints the outermost message and exits nonzero.
//! Anything not in this enum is an internal error and carries breadcrumb
//! context from the failing operation instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fatal {
    #[error("Please enter a command.")]
    NoCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileDoesNotExist,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
    #[error("No changes added to commit.")]
    NothingToCommit,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,
    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,
    #[error("A branch with that name does not exist.")]
    BranchDoesNotExist,
    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,
    #[error("Found no commit with that message.")]
    NoMatchingCommit,
    #[error("A remote with that name already exists.")]
    RemoteAlreadyExists,
}

/// True when `err` bottoms out in a missing-file I/O error.
///
/// Commands use this to turn "the blob/ref file is not there" into the
/// appropriate fatal message instead of surfacing the raw I/O failure.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
}
