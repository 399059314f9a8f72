//! In-memory materialized tree.
//!
//! [`InMemoryFilesystem`] is what remotes materialize a commit into: built
//! once, then shared behind an `Arc` for the lifetime of that commit's
//! checkout. Opening a file hands out an owned cursor over the contents, so
//! handles never borrow from the tree.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use crate::error::{VfsError, VfsResult};
use crate::path;
use crate::traits::{ReadonlyFile, ReadonlyFilesystem};

/// A HashMap-backed read-only tree.
///
/// Mutation is only possible while the builder still owns it; once wrapped
/// in an `Arc<dyn ReadonlyFilesystem>` the tree is frozen.
#[derive(Clone, Default)]
pub struct InMemoryFilesystem {
    files: HashMap<String, Arc<[u8]>>,
}

impl InMemoryFilesystem {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at the given virtual path, replacing any previous contents.
    pub fn insert(
        &mut self,
        file_path: impl AsRef<str>,
        contents: impl AsRef<[u8]>,
    ) -> VfsResult<()> {
        let canonical = path::normalize(file_path.as_ref())?;
        if canonical.is_empty() {
            return Err(VfsError::InvalidPath {
                path: file_path.as_ref().to_string(),
                reason: "empty path".into(),
            });
        }
        self.files.insert(canonical, Arc::from(contents.as_ref()));
        Ok(())
    }

    /// Number of files in the tree.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the tree holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sorted list of all file paths in the tree.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl std::fmt::Debug for InMemoryFilesystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryFilesystem")
            .field("file_count", &self.files.len())
            .finish()
    }
}

impl ReadonlyFilesystem for InMemoryFilesystem {
    fn open(&self, file_path: &str) -> VfsResult<Box<dyn ReadonlyFile>> {
        let canonical = path::normalize(file_path)?;
        match self.files.get(&canonical) {
            Some(contents) => Ok(Box::new(InMemoryFile {
                path: canonical,
                contents: Arc::clone(contents),
                position: 0,
            })),
            None => Err(VfsError::NotFound { path: canonical }),
        }
    }

    fn contains(&self, file_path: &str) -> bool {
        match path::normalize(file_path) {
            Ok(canonical) => self.files.contains_key(&canonical),
            Err(_) => false,
        }
    }
}

/// An open file backed by shared immutable bytes.
#[derive(Debug)]
pub struct InMemoryFile {
    path: String,
    contents: Arc<[u8]>,
    position: usize,
}

impl Read for InMemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let remaining = &self.contents[self.position..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}

impl ReadonlyFile for InMemoryFile {
    fn path(&self) -> &str {
        &self.path
    }
}
