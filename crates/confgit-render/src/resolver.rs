//! Import resolution against materialized trees.

use std::collections::HashMap;
use std::sync::Arc;

use confgit_vfs::{path, ReadonlyFilesystem, VfsError};

use crate::error::ImportError;

/// A resolved import: the file's contents plus the canonical path it was
/// found at. Evaluators use `found_at` both as the cache key for repeated
/// imports and as the base path for transitive imports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedImport {
    pub contents: String,
    pub found_at: String,
}

/// How a template evaluator reaches files.
///
/// `imported_from` is the path of the file issuing the import (`""` for the
/// entry file itself); `imported_path` is the import as written, relative to
/// the importing file's directory.
pub trait ImportResolver: Send + Sync {
    fn resolve(
        &self,
        imported_from: &str,
        imported_path: &str,
    ) -> Result<ResolvedImport, ImportError>;
}

/// Resolver backed by a materialized read-only tree — the adapter between
/// the reference cache's product and the template evaluator's contract.
pub struct FilesystemResolver {
    filesystem: Arc<dyn ReadonlyFilesystem>,
}

impl FilesystemResolver {
    pub fn new(filesystem: Arc<dyn ReadonlyFilesystem>) -> Self {
        Self { filesystem }
    }
}

impl ImportResolver for FilesystemResolver {
    fn resolve(
        &self,
        imported_from: &str,
        imported_path: &str,
    ) -> Result<ResolvedImport, ImportError> {
        let directory = path::parent(imported_from);
        let resolved = path::join(directory, imported_path).map_err(|source| ImportError::Read {
            path: imported_path.to_string(),
            source,
        })?;
        match self.filesystem.read_to_string(&resolved) {
            Ok(contents) => Ok(ResolvedImport {
                contents,
                found_at: resolved,
            }),
            Err(VfsError::NotFound { path }) => Err(ImportError::NotFound { path }),
            Err(source) => Err(ImportError::Read {
                path: resolved,
                source,
            }),
        }
    }
}

/// Map-backed resolver for tests: no tree, no cache, just literal files.
#[derive(Default)]
pub struct StaticResolver {
    files: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(file_path.into(), contents.into());
        self
    }
}

impl ImportResolver for StaticResolver {
    fn resolve(
        &self,
        imported_from: &str,
        imported_path: &str,
    ) -> Result<ResolvedImport, ImportError> {
        let directory = path::parent(imported_from);
        let resolved = path::join(directory, imported_path).map_err(|source| ImportError::Read {
            path: imported_path.to_string(),
            source,
        })?;
        match self.files.get(&resolved) {
            Some(contents) => Ok(ResolvedImport {
                contents: contents.clone(),
                found_at: resolved,
            }),
            None => Err(ImportError::NotFound { path: resolved }),
        }
    }
}
