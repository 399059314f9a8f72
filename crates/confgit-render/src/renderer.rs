//! Entry-point rendering: format dispatch and overlay application.

use std::sync::Arc;

use serde_json::Value;

use confgit_types::ContentType;

use crate::engine::TemplateEngine;
use crate::error::{EngineError, ImportError, RenderError, RenderResult};
use crate::merge::merge_values;
use crate::resolver::ImportResolver;

/// Renders entry templates into output documents.
///
/// Holds only the engine; the resolver is per-call because each render walks
/// whichever materialized tree the caller's environment resolved to.
#[derive(Clone)]
pub struct TemplateRenderer {
    engine: Arc<dyn TemplateEngine>,
}

impl TemplateRenderer {
    pub fn new(engine: Arc<dyn TemplateEngine>) -> Self {
        Self { engine }
    }

    /// Evaluate `entry` and serialize it as `output`.
    ///
    /// With an overlay, the caller's data is merged on top of the evaluated
    /// document right-biased: overlay keys win, nested objects merge
    /// recursively, untouched keys survive. No side effects beyond reads
    /// through `resolver`.
    pub fn render(
        &self,
        resolver: &dyn ImportResolver,
        entry: &str,
        output: ContentType,
        overlay: Option<&Value>,
    ) -> RenderResult<String> {
        match output {
            ContentType::Json => {}
            // YAML/TOML are declared extension points; Unknown is always
            // rejected.
            format => return Err(RenderError::UnsupportedFormat { format }),
        }

        let document = self
            .engine
            .evaluate_file(entry, resolver)
            .map_err(|err| match err {
                EngineError::Import(ImportError::NotFound { path })
                | EngineError::Import(ImportError::Read { path, .. }) => {
                    RenderError::ImportNotFound { path }
                }
                other => RenderError::Evaluation {
                    entry: entry.to_string(),
                    source: other,
                },
            })?;

        match overlay {
            None => Ok(document),
            Some(data) => {
                let base: Value = serde_json::from_str(&document)?;
                let merged = merge_values(base, data.clone());
                Ok(serde_json::to_string(&merged)?)
            }
        }
    }
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::engine::JsonEngine;
    use crate::resolver::StaticResolver;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new(Arc::new(JsonEngine::new()))
    }

    #[test]
    fn render_without_overlay() {
        let resolver =
            StaticResolver::new().with_file("default.jsonnet", "{\"a\": 1, \"b\": {\"c\": 2}}");
        let doc = renderer()
            .render(&resolver, "default.jsonnet", ContentType::Json, None)
            .unwrap();
        assert_eq!(doc, "{\"a\":1,\"b\":{\"c\":2}}");
    }

    #[test]
    fn render_with_overlay_merges_right_biased() {
        let resolver =
            StaticResolver::new().with_file("default.jsonnet", "{\"a\": 1, \"b\": {\"c\": 2}}");
        let overlay = json!({"b": {"c": 9, "d": 4}});
        let doc = renderer()
            .render(
                &resolver,
                "default.jsonnet",
                ContentType::Json,
                Some(&overlay),
            )
            .unwrap();
        assert_eq!(doc, "{\"a\":1,\"b\":{\"c\":9,\"d\":4}}");
    }

    #[test]
    fn yaml_and_toml_are_unsupported() {
        let resolver = StaticResolver::new().with_file("default.jsonnet", "{}");
        for format in [ContentType::Yaml, ContentType::Toml] {
            let err = renderer()
                .render(&resolver, "default.jsonnet", format, None)
                .unwrap_err();
            assert!(
                matches!(err, RenderError::UnsupportedFormat { format: f } if f == format),
                "expected UnsupportedFormat for {format}"
            );
        }
    }

    #[test]
    fn unknown_format_always_fails() {
        let resolver = StaticResolver::new().with_file("default.jsonnet", "{}");
        let err = renderer()
            .render(&resolver, "default.jsonnet", ContentType::Unknown, None)
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_entry_surfaces_as_import_not_found() {
        let resolver = StaticResolver::new();
        let err = renderer()
            .render(&resolver, "absent.jsonnet", ContentType::Json, None)
            .unwrap_err();
        assert!(
            matches!(&err, RenderError::ImportNotFound { path } if path == "absent.jsonnet"),
            "got: {err}"
        );
    }

    #[test]
    fn evaluation_failure_carries_the_diagnostic() {
        let resolver = StaticResolver::new().with_file("bad.jsonnet", "{ nope");
        let err = renderer()
            .render(&resolver, "bad.jsonnet", ContentType::Json, None)
            .unwrap_err();
        match err {
            RenderError::Evaluation { entry, source } => {
                assert_eq!(entry, "bad.jsonnet");
                assert!(matches!(source, EngineError::Parse { .. }));
            }
            other => panic!("expected Evaluation, got: {other}"),
        }
    }

    #[test]
    fn overlay_on_scalar_document_replaces_it() {
        let resolver = StaticResolver::new().with_file("scalar.jsonnet", "42");
        let overlay = json!({"a": 1});
        let doc = renderer()
            .render(
                &resolver,
                "scalar.jsonnet",
                ContentType::Json,
                Some(&overlay),
            )
            .unwrap();
        assert_eq!(doc, "{\"a\":1}");
    }
}
