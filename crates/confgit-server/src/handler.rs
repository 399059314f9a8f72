use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use confgit_render::FilesystemResolver;
use confgit_source::SourceError;
use confgit_types::ContentType;
use confgit_vfs::ReadonlyFilesystem;

use crate::error::ServerResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "name": "confgit-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Known environments, refreshed under the cache's TTL policy.
pub async fn environments_handler(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    let environments = state.source.environments().await?;
    Ok(Json(json!({ "environments": environments })))
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    /// Environment (branch) to read; defaults to the source's current
    /// selection.
    pub env: Option<String>,
    /// Output format; defaults to JSON.
    pub format: Option<String>,
}

impl RenderQuery {
    fn content_type(&self) -> ContentType {
        match self.format.as_deref() {
            Some(format) => ContentType::parse(format),
            None => ContentType::Json,
        }
    }
}

/// Raw (unrendered) namespaced template contents.
pub async fn source_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Query(query): Query<RenderQuery>,
) -> ServerResult<Response> {
    let tree = tree_for(&state, query.env.as_deref()).await?;
    let path = state.source.namespace_path(&namespace);
    let contents = tree
        .read_to_string(&path)
        .map_err(|source| SourceError::FileNotFound { path, source })?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        contents,
    )
        .into_response())
}

/// Rendered configuration document.
pub async fn render_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Query(query): Query<RenderQuery>,
) -> ServerResult<Response> {
    render(&state, &namespace, &query, None).await
}

/// Rendered configuration document with the request body merged on top.
pub async fn render_with_overlay_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Query(query): Query<RenderQuery>,
    Json(overlay): Json<Value>,
) -> ServerResult<Response> {
    render(&state, &namespace, &query, Some(overlay)).await
}

async fn render(
    state: &AppState,
    namespace: &str,
    query: &RenderQuery,
    overlay: Option<Value>,
) -> ServerResult<Response> {
    let format = query.content_type();
    let tree = tree_for(state, query.env.as_deref()).await?;
    let resolver = FilesystemResolver::new(tree);
    let entry = state.source.namespace_path(namespace);
    let document = state
        .renderer
        .render(&resolver, &entry, format, overlay.as_ref())?;
    Ok(([(header::CONTENT_TYPE, format.mime())], document).into_response())
}

async fn tree_for(
    state: &AppState,
    env: Option<&str>,
) -> ServerResult<Arc<dyn ReadonlyFilesystem>> {
    let tree = match env {
        Some(environment) => state.source.filesystem_for(environment).await?,
        None => state.source.filesystem().await?,
    };
    Ok(tree)
}
