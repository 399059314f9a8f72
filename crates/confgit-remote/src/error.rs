use std::time::Duration;

use thiserror::Error;

use confgit_types::CommitId;
use confgit_vfs::VfsError;

/// Errors from remote repository operations.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote could not be reached or refused the operation.
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The remote rejected the supplied credential.
    #[error("authentication failed for {url}")]
    AuthFailed { url: String },

    /// Contacting the remote exceeded the per-attempt deadline.
    #[error("remote contact timed out after {after:?}")]
    TimedOut { after: Duration },

    /// The commit is not known to the remote (stale reference data).
    #[error("unknown commit: {commit}")]
    UnknownCommit { commit: CommitId },

    /// Materialization produced an invalid tree.
    #[error("filesystem error: {0}")]
    Vfs(#[from] VfsError),

    /// I/O error from the underlying transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;
