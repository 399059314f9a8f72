use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all ConfGit endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/environments", get(handler::environments_handler))
        .route("/v1/source/:namespace", get(handler::source_handler))
        .route(
            "/v1/config/:namespace",
            get(handler::render_handler).post(handler::render_with_overlay_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
