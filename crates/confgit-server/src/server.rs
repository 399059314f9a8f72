use std::sync::Arc;

use tokio::net::TcpListener;

use confgit_render::TemplateRenderer;
use confgit_source::ConfigSource;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// ConfGit API server.
pub struct ConfigServer {
    config: ServerConfig,
    state: AppState,
}

impl ConfigServer {
    pub fn new(config: ServerConfig, source: Arc<ConfigSource>, renderer: TemplateRenderer) -> Self {
        Self {
            config,
            state: AppState::new(source, renderer),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state.clone());
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            remote = %self.state.source.remote_url(),
            "confgit server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use confgit_remote::{ConfigRemote, InMemoryRemote};
    use confgit_render::JsonEngine;
    use confgit_source::SourceOptions;

    fn server() -> ConfigServer {
        let remote = Arc::new(InMemoryRemote::new("mem://config"));
        remote.set_branch("master", &[("default.jsonnet", "{}")]);
        let source = ConfigSource::new(
            remote as Arc<dyn ConfigRemote>,
            SourceOptions::new().with_fetch_ttl(Duration::from_secs(3600)),
        );
        ConfigServer::new(
            ServerConfig::default(),
            Arc::new(source),
            TemplateRenderer::new(Arc::new(JsonEngine::new())),
        )
    }

    #[test]
    fn server_construction() {
        let s = server();
        assert_eq!(s.config().bind_addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let _router = server().router();
    }
}
