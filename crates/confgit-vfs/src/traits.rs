use std::io::Read;

use crate::error::{VfsError, VfsResult};

/// An open read-only file from a materialized tree.
///
/// Handles own their contents: they remain readable after the filesystem
/// that produced them is dropped or superseded by a newer checkout.
pub trait ReadonlyFile: Read + Send + std::fmt::Debug {
    /// The canonical (normalized, root-relative) path this file was opened at.
    fn path(&self) -> &str;
}

/// A point-in-time, read-only tree of configuration files.
///
/// Implementations must be thread-safe (`Send + Sync`); a single tree is
/// shared by every request handler reading the same checkout. There is no
/// close operation — dropping the last handle releases the tree.
pub trait ReadonlyFilesystem: Send + Sync + std::fmt::Debug {
    /// Open a file by its virtual path.
    ///
    /// The path is normalized before lookup. Fails with
    /// [`VfsError::NotFound`] if no file exists at the path.
    fn open(&self, path: &str) -> VfsResult<Box<dyn ReadonlyFile>>;

    /// Whether a file exists at the (normalized) path.
    fn contains(&self, path: &str) -> bool;

    /// Open a file and read its full contents as UTF-8 text.
    fn read_to_string(&self, path: &str) -> VfsResult<String> {
        let mut file = self.open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(VfsError::Io)?;
        Ok(contents)
    }
}
