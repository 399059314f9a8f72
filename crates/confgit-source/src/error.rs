use thiserror::Error;

use confgit_types::CommitId;
use confgit_remote::RemoteError;
use confgit_vfs::VfsError;

/// Errors surfaced by the reference cache.
///
/// Fetch failures only appear here when the cache is cold; a warm cache
/// absorbs them into a warning and serves stale data instead.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A required fetch failed before the cache ever held usable data.
    #[error("fetch from {url} failed")]
    FetchFailed {
        url: String,
        #[source]
        source: RemoteError,
    },

    /// The requested environment has no known branch reference.
    #[error("environment not found: {environment}")]
    EnvironmentNotFound { environment: String },

    /// Materializing a commit failed. Other environments' snapshots are
    /// unaffected.
    #[error("checkout of {commit} for environment {environment} failed")]
    CheckoutFailed {
        environment: String,
        commit: CommitId,
        #[source]
        source: RemoteError,
    },

    /// The namespaced file does not exist in the materialized tree.
    #[error("file not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: VfsError,
    },

    /// The environment name is not a valid branch name.
    #[error("invalid environment name {name:?}: {reason}")]
    InvalidEnvironment { name: String, reason: String },
}

/// Result alias for cache operations.
pub type SourceResult<T> = Result<T, SourceError>;
