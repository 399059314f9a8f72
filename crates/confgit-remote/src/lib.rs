//! Remote repository capability for ConfGit.
//!
//! The version-control transport itself is an external collaborator: ConfGit
//! never fetches packfiles or walks object graphs. What the reference cache
//! needs from a remote is exactly three operations, captured by
//! [`ConfigRemote`]:
//!
//! - fetch the current branch heads (under the caller's deadline)
//! - list the reference → commit mapping observed by the last fetch
//! - materialize the tree for a given commit as a read-only filesystem
//!
//! # Implementations
//!
//! - [`InMemoryRemote`] — scriptable double for unit tests: call counters,
//!   failure injection, artificial latency
//! - [`DirRemote`] — local directory as a remote (one subdirectory per
//!   branch) for development and the CLI; commit ids are content-derived
//!
//! A git-backed implementation lives with whatever transport the embedding
//! application already carries; it only has to satisfy the trait.

pub mod auth;
pub mod dir;
pub mod error;
pub mod memory;
pub mod transport;
pub mod types;

pub use auth::AuthMethod;
pub use dir::DirRemote;
pub use error::{RemoteError, RemoteResult};
pub use memory::InMemoryRemote;
pub use transport::ConfigRemote;
pub use types::{FetchOutcome, RefSpec};
