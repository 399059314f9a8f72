use thiserror::Error;

/// Errors from read-only filesystem operations.
#[derive(Debug, Error)]
pub enum VfsError {
    /// The requested file does not exist in the tree.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// The path is malformed or escapes the tree root.
    #[error("invalid path: {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// I/O error while reading file contents.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for filesystem operations.
pub type VfsResult<T> = Result<T, VfsError>;
