use thiserror::Error;

use confgit_types::ContentType;
use confgit_vfs::VfsError;

/// Errors from resolving an import path to file contents.
#[derive(Debug, Error)]
pub enum ImportError {
    /// No file exists at the resolved path.
    #[error("import not found: {path}")]
    NotFound { path: String },

    /// The file exists but could not be read.
    #[error("import of {path} failed")]
    Read {
        path: String,
        #[source]
        source: VfsError,
    },
}

/// Errors from the template evaluation capability.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The template source failed to parse.
    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// The template parsed but evaluation failed.
    #[error("evaluation error in {file}: {message}")]
    Evaluation { file: String, message: String },

    /// An import could not be resolved.
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Errors surfaced by the renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The evaluator reported a syntax or evaluation failure; the
    /// underlying diagnostic is preserved.
    #[error("evaluation of {entry} failed")]
    Evaluation {
        entry: String,
        #[source]
        source: EngineError,
    },

    /// An imported file was absent from the tree.
    #[error("import not found: {path}")]
    ImportNotFound { path: String },

    /// The requested output format is not implemented.
    #[error("unsupported output format: {format}")]
    UnsupportedFormat { format: ContentType },

    /// Converting the evaluated value to the requested format failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
