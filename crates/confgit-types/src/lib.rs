//! Core types shared across ConfGit.
//!
//! ConfGit treats a remote version-control repository as the source of truth
//! for per-environment configuration templates. The types in this crate are
//! the vocabulary every other crate speaks:
//!
//! - [`CommitId`] — identifier of a point-in-time state of a branch
//! - [`ContentType`] — output format requested for a rendered document
//! - [`TypeError`] — parse/validation failures for the above

pub mod commit;
pub mod content;
pub mod error;

pub use commit::CommitId;
pub use content::ContentType;
pub use error::TypeError;
