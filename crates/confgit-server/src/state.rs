use std::sync::Arc;

use confgit_render::TemplateRenderer;
use confgit_source::ConfigSource;

/// Shared handler state: one reference cache, one renderer.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<ConfigSource>,
    pub renderer: TemplateRenderer,
}

impl AppState {
    pub fn new(source: Arc<ConfigSource>, renderer: TemplateRenderer) -> Self {
        Self { source, renderer }
    }
}
