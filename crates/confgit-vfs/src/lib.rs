//! Read-only filesystem abstraction for ConfGit.
//!
//! A checkout of a configuration branch is a point-in-time tree of template
//! files. Consumers only ever read it: the cache publishes a new tree when
//! the branch advances and the old one stays valid for whoever still holds
//! it. This crate defines that contract and the in-memory tree every remote
//! materializes into.
//!
//! # Design Rules
//!
//! 1. A materialized tree is immutable. There is no write surface at all.
//! 2. Replacement is by substitution: a newer checkout never mutates or
//!    invalidates a previously returned tree.
//! 3. Paths are virtual, slash-separated, and root-relative. `.` and `..`
//!    components are normalized away; traversal above the root is an error.
//! 4. Open file handles own their data and outlive the filesystem handle
//!    they came from.
//!
//! # Modules
//!
//! - [`error`] — [`VfsError`] and result alias
//! - [`traits`] — [`ReadonlyFilesystem`] and [`ReadonlyFile`]
//! - [`path`] — virtual path normalization and joining
//! - [`memory`] — [`InMemoryFilesystem`], the materialization target

pub mod error;
pub mod memory;
pub mod path;
pub mod traits;

pub use error::{VfsError, VfsResult};
pub use memory::InMemoryFilesystem;
pub use traits::{ReadonlyFile, ReadonlyFilesystem};
