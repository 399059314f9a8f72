//! Virtual path handling for materialized trees.
//!
//! Tree paths are slash-separated and root-relative regardless of host
//! platform. Normalization resolves `.` and `..` components and collapses
//! duplicate separators; a path that would climb above the tree root is
//! rejected rather than clamped.

use crate::error::{VfsError, VfsResult};

/// Normalize a virtual path to its canonical root-relative form.
///
/// # Examples
///
/// ```
/// use confgit_vfs::path::normalize;
///
/// assert_eq!(normalize("a/./b//c").unwrap(), "a/b/c");
/// assert_eq!(normalize("a/b/../c").unwrap(), "a/c");
/// assert_eq!(normalize("/rooted").unwrap(), "rooted");
/// assert!(normalize("../escape").is_err());
/// ```
pub fn normalize(path: &str) -> VfsResult<String> {
    let mut components: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => continue,
            ".." => {
                if components.pop().is_none() {
                    return Err(VfsError::InvalidPath {
                        path: path.to_string(),
                        reason: "escapes the tree root".into(),
                    });
                }
            }
            other => components.push(other),
        }
    }
    Ok(components.join("/"))
}

/// The directory component of a path (`""` for a root-level file).
///
/// The original file path is assumed normalized; the result is suitable as
/// a `join` base for sibling lookups.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Join a relative path onto a base directory and normalize the result.
pub fn join(base: &str, relative: &str) -> VfsResult<String> {
    if base.is_empty() {
        normalize(relative)
    } else {
        normalize(&format!("{base}/{relative}"))
    }
}
