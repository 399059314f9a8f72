//! Template rendering for ConfGit.
//!
//! The template language is an external capability: anything that can
//! evaluate an entry file against an import resolver to a JSON document
//! plugs in behind [`TemplateEngine`]. What this crate owns is everything
//! around that seam:
//!
//! - [`ImportResolver`] — how imports reach into a materialized tree.
//!   [`FilesystemResolver`] resolves a relative import against the
//!   directory of the importing file and walks the same read-only
//!   filesystem the reference cache produced.
//! - [`merge_values`] — the right-biased recursive merge applied when a
//!   caller overlays data on top of a rendered entry.
//! - [`TemplateRenderer`] — format dispatch and overlay application.
//!
//! [`JsonEngine`] is the built-in engine for plain-JSON trees; it keeps the
//! server and CLI runnable without binding a template DSL.

pub mod engine;
pub mod error;
pub mod merge;
pub mod renderer;
pub mod resolver;

pub use engine::{JsonEngine, TemplateEngine};
pub use error::{EngineError, ImportError, RenderError, RenderResult};
pub use merge::merge_values;
pub use renderer::TemplateRenderer;
pub use resolver::{FilesystemResolver, ImportResolver, ResolvedImport, StaticResolver};
