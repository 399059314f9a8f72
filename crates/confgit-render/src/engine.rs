//! The template evaluation capability.

use serde_json::Value;

use crate::error::EngineError;
use crate::resolver::ImportResolver;

/// A template evaluator.
///
/// Implementations evaluate an entry file (or an anonymous snippet) into a
/// JSON document string, loading the entry and everything it imports through
/// the supplied resolver. Evaluation must have no side effects beyond those
/// reads.
pub trait TemplateEngine: Send + Sync {
    /// Evaluate the template at `entry` to a JSON document.
    fn evaluate_file(
        &self,
        entry: &str,
        resolver: &dyn ImportResolver,
    ) -> Result<String, EngineError>;

    /// Evaluate an anonymous snippet. `name` is used in diagnostics and as
    /// the base path for any imports the snippet issues.
    fn evaluate_snippet(
        &self,
        name: &str,
        source: &str,
        resolver: &dyn ImportResolver,
    ) -> Result<String, EngineError>;
}

/// Built-in engine for plain-JSON configuration trees.
///
/// Templates are JSON documents as written; there is no DSL and no import
/// directive. Evaluation validates the source and re-emits it in compact
/// canonical form. Richer languages (jsonnet bindings and the like) slot in
/// as alternative [`TemplateEngine`] implementations.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonEngine;

impl JsonEngine {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateEngine for JsonEngine {
    fn evaluate_file(
        &self,
        entry: &str,
        resolver: &dyn ImportResolver,
    ) -> Result<String, EngineError> {
        let resolved = resolver.resolve("", entry)?;
        self.evaluate_snippet(&resolved.found_at, &resolved.contents, resolver)
    }

    fn evaluate_snippet(
        &self,
        name: &str,
        source: &str,
        _resolver: &dyn ImportResolver,
    ) -> Result<String, EngineError> {
        let value: Value = serde_json::from_str(source).map_err(|e| EngineError::Parse {
            file: name.to_string(),
            message: e.to_string(),
        })?;
        serde_json::to_string(&value).map_err(|e| EngineError::Evaluation {
            file: name.to_string(),
            message: e.to_string(),
        })
    }
}
