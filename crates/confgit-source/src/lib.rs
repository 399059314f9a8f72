//! The ConfGit reference cache.
//!
//! A [`ConfigSource`] owns the cache's consistency policy between a remote
//! configuration repository and its consumers:
//!
//! - **When to talk to the remote**: at most once per TTL window; the
//!   freshness check, fetch, and reference bookkeeping all run under one
//!   lock, so concurrent cache-miss callers collapse onto a single fetch.
//! - **When to re-materialize**: only when a branch's remote head differs
//!   from the locally materialized commit. Checkout is the expensive
//!   operation; a matching commit hash reuses the existing tree.
//! - **How to degrade**: once any fetch has succeeded, later fetch failures
//!   are logged and the last known reference data keeps serving. Staleness
//!   is bounded by the TTL plus the outage duration; availability wins.
//!
//! # Modules
//!
//! - [`error`] — [`SourceError`] taxonomy
//! - [`names`] — environment ⇄ branch reference naming and validation
//! - [`options`] — [`SourceOptions`] construction-time configuration
//! - [`snapshot`] — per-branch [`RefSnapshot`] records
//! - [`source`] — [`ConfigSource`] itself

pub mod error;
pub mod names;
pub mod options;
pub mod snapshot;
pub mod source;

pub use error::{SourceError, SourceResult};
pub use options::SourceOptions;
pub use snapshot::{Checkout, RefSnapshot};
pub use source::ConfigSource;
