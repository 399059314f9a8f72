//! HTTP API for ConfGit.
//!
//! A thin request-dispatch shim over the reference cache and renderer. The
//! interesting behavior (TTL, stale fallback, checkout policy, overlay
//! merge) all lives below this layer; handlers translate paths and query
//! parameters into core calls and core errors into status codes.
//!
//! Routes:
//!
//! - `GET /v1/health`, `GET /v1/info`
//! - `GET /v1/environments`
//! - `GET /v1/source/:namespace?env=` — raw template
//! - `GET /v1/config/:namespace?env=&format=` — rendered document
//! - `POST /v1/config/:namespace?env=&format=` — rendered with the request
//!   body applied as a right-biased overlay

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::ConfigServer;
pub use state::AppState;
