//! Build-engine abstraction.
//!
//! Drover never compiles anything itself; it talks to an external build
//! engine through the types in this module. The engine delivers one
//! [`RawCompileResult`] per compile pass, either as the return value of a
//! one-shot run or as a stream of [`CompileEvent`]s in watch mode. Events are
//! strictly sequential: one compile pass completes before the next begins.
//!
//! The reporting core only depends on `CompileEvent`, so tests can drive it
//! with synthetic events instead of a real engine process.

pub mod command;

pub use command::CommandEngine;

use crate::error::EngineError;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::mpsc;

/// One compile pass result as reported by the build engine.
///
/// Missing `errors`/`warnings` containers deserialize as empty sequences,
/// never as a failure. Consumed exactly once by the classifier per pass.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCompileResult {
    /// Errors in engine emission order
    pub errors: Vec<RawMessage>,
    /// Warnings in engine emission order
    pub warnings: Vec<RawMessage>,
    /// The engine's own formatted textual summary, if it produced one
    pub stats: Option<String>,
}

impl RawCompileResult {
    /// True when the pass produced neither errors nor warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// A single error or warning entry from the engine.
///
/// Engines emit either bare strings or structured records; both shapes are
/// accepted and normalized by the classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawMessage {
    /// Plain message text
    Text(String),
    /// Structured record with optional trace and source location
    Structured {
        /// Message body
        message: String,
        /// Raw stack/trace text, when the engine attached one
        #[serde(default)]
        stack: Option<String>,
        /// Source module the message refers to
        #[serde(default, rename = "moduleName")]
        module_name: Option<String>,
        /// Location within the module as `"line:column"`
        #[serde(default)]
        loc: Option<String>,
    },
}

impl RawMessage {
    /// Construct a plain text message (handy in tests and defaults).
    pub fn text(message: impl Into<String>) -> Self {
        RawMessage::Text(message.into())
    }
}

/// Compile-lifecycle notification from the engine in watch mode.
#[derive(Debug, Clone)]
pub enum CompileEvent {
    /// A compile pass has started
    Started,
    /// A compile pass finished with the given result
    Done(RawCompileResult),
}

/// Subscription interface to a build engine.
///
/// Concrete engines run a subprocess; fakes in tests can synthesize results
/// and events directly.
#[async_trait]
pub trait BuildEngine {
    /// Run a single compile pass to completion.
    async fn run_once(&mut self) -> Result<RawCompileResult, EngineError>;

    /// Start the engine in watch mode and return its event stream.
    ///
    /// The receiver closes when the engine process exits.
    async fn watch(&mut self) -> Result<mpsc::Receiver<CompileEvent>, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_missing_containers_are_empty() {
        let result: RawCompileResult = serde_json::from_str("{}").unwrap();
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert!(result.stats.is_none());
        assert!(result.is_clean());
    }

    #[test]
    fn test_result_with_string_messages() {
        let result: RawCompileResult =
            serde_json::from_str(r#"{"errors": ["Module not found: ./x"], "warnings": []}"#)
                .unwrap();
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            &result.errors[0],
            RawMessage::Text(s) if s == "Module not found: ./x"
        ));
        assert!(!result.is_clean());
    }

    #[test]
    fn test_result_with_structured_messages() {
        let json = r#"{
            "warnings": [{
                "message": "unused var y",
                "moduleName": "src/app.js",
                "loc": "4:7"
            }]
        }"#;
        let result: RawCompileResult = serde_json::from_str(json).unwrap();
        match &result.warnings[0] {
            RawMessage::Structured {
                message,
                module_name,
                loc,
                stack,
            } => {
                assert_eq!(message, "unused var y");
                assert_eq!(module_name.as_deref(), Some("src/app.js"));
                assert_eq!(loc.as_deref(), Some("4:7"));
                assert!(stack.is_none());
            }
            other => panic!("expected structured message, got {:?}", other),
        }
    }

    #[test]
    fn test_result_stats_passthrough() {
        let result: RawCompileResult =
            serde_json::from_str(r#"{"stats": "Built in 120ms"}"#).unwrap();
        assert_eq!(result.stats.as_deref(), Some("Built in 120ms"));
    }
}
