//! Message classification: raw engine messages → display diagnostics.
//!
//! Classification never fails. Any message shape the classifier does not
//! understand degrades to printing the unparsed text; a parse failure here is
//! recovered locally and never aborts the reporting flow.

use crate::engine::{RawCompileResult, RawMessage};
use std::fmt;

/// Substrings that mark an error as coming from a minifier, whose stacks
/// carry a bracketed source location worth extracting.
const MINIFIER_MARKERS: &[&str] = &["from UglifyJs", "from Terser"];

/// A single error or warning in canonical display form.
///
/// Location fields stay as strings: they are display data taken verbatim
/// from the engine, not coordinates drover computes with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Message body
    pub raw_message: String,
    /// Source file the message refers to, when known
    pub source_path: Option<String>,
    /// Line within the source file
    pub line: Option<String>,
    /// Column within the line
    pub column: Option<String>,
}

impl Diagnostic {
    /// A diagnostic with no source location.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            raw_message: message.into(),
            source_path: None,
            line: None,
            column: None,
        }
    }

    /// A diagnostic with a full source location.
    pub fn located(
        message: impl Into<String>,
        path: impl Into<String>,
        line: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            raw_message: message.into(),
            source_path: Some(path.into()),
            line: Some(line.into()),
            column: Some(column.into()),
        }
    }

    /// Build a diagnostic from free-form failure text.
    ///
    /// Used for engine-fatal errors and minifier stacks: attempts the
    /// bracketed-location extraction and falls back to the raw text.
    pub fn from_failure_text(text: &str) -> Self {
        match parse_bracketed_location(text) {
            StackLocation::Structured { path, line, column } => {
                Self::located(text.to_string(), path, line, column)
            }
            StackLocation::Unstructured(raw) => Self::text(raw),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source_path, &self.line, &self.column) {
            (Some(path), Some(line), Some(column)) => {
                writeln!(f, "{}:{},{}", path, line, column)?;
                write!(f, "{}", self.raw_message)
            }
            (Some(path), _, _) => {
                writeln!(f, "{}", path)?;
                write!(f, "{}", self.raw_message)
            }
            _ => write!(f, "{}", self.raw_message),
        }
    }
}

/// Result of parsing a minifier-style stack string.
///
/// The fallback is an explicit variant rather than pattern-match failure used
/// as control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackLocation {
    /// Extracted `(path, line, column)` from a bracketed group
    Structured {
        /// Source path inside the first bracketed group
        path: String,
        /// Line number as emitted
        line: String,
        /// Column number as emitted
        column: String,
    },
    /// No structured location; carries the original text
    Unstructured(String),
}

/// Parse the pattern `<free text>[<path>:<line>,<column>][<rest>]`.
///
/// The second bracketed group must be present; anything else returns
/// [`StackLocation::Unstructured`] with the input intact.
pub fn parse_bracketed_location(stack: &str) -> StackLocation {
    fn structured(stack: &str) -> Option<StackLocation> {
        let open = stack.find('[')?;
        let rest = &stack[open + 1..];
        let close = rest.find(']')?;
        let group = &rest[..close];
        let after = &rest[close + 1..];

        // Require the trailing bracketed group.
        let second_open = after.find('[')?;
        after[second_open + 1..].find(']')?;

        // `path` may itself contain ':' (drive letters), so split on the
        // last one.
        let colon = group.rfind(':')?;
        let (path, line_col) = group.split_at(colon);
        let (line, column) = line_col[1..].split_once(',')?;

        let numeric =
            |s: &str| !s.is_empty() && s.chars().all(|c: char| c.is_ascii_digit());
        if path.is_empty() || !numeric(line) || !numeric(column) {
            return None;
        }

        Some(StackLocation::Structured {
            path: path.to_string(),
            line: line.to_string(),
            column: column.to_string(),
        })
    }

    structured(stack).unwrap_or_else(|| StackLocation::Unstructured(stack.to_string()))
}

/// Classify a raw compile result into `(errors, warnings)`.
///
/// Both sequences preserve the engine's emission order and are returned in
/// full; truncating for display is the session's decision, not the
/// classifier's.
pub fn classify(result: &RawCompileResult) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
    let errors = result.errors.iter().map(diagnostic_from_message).collect();
    let warnings = result.warnings.iter().map(diagnostic_from_message).collect();
    (errors, warnings)
}

fn diagnostic_from_message(message: &RawMessage) -> Diagnostic {
    match message {
        RawMessage::Text(text) => Diagnostic::text(text.clone()),
        RawMessage::Structured {
            message,
            stack,
            module_name,
            loc,
        } => {
            if let Some(stack) = stack {
                if MINIFIER_MARKERS.iter().any(|m| message.contains(m)) {
                    return match parse_bracketed_location(stack) {
                        StackLocation::Structured { path, line, column } => {
                            Diagnostic::located(message.clone(), path, line, column)
                        }
                        // Recovered parse failure: print the raw stack text.
                        StackLocation::Unstructured(raw) => Diagnostic::text(raw),
                    };
                }
            }

            if let Some(module) = module_name {
                let (line, column) = loc
                    .as_deref()
                    .and_then(|l| l.split_once(':'))
                    .map(|(l, c)| (Some(l.to_string()), Some(c.to_string())))
                    .unwrap_or((None, None));
                return Diagnostic {
                    raw_message: message.clone(),
                    source_path: Some(module.clone()),
                    line,
                    column,
                };
            }

            Diagnostic::text(message.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RawMessage;

    fn result_with(errors: Vec<RawMessage>, warnings: Vec<RawMessage>) -> RawCompileResult {
        RawCompileResult {
            errors,
            warnings,
            stats: None,
        }
    }

    #[test]
    fn test_classify_empty_containers() {
        let (errors, warnings) = classify(&result_with(vec![], vec![]));
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_classify_preserves_order() {
        let result = result_with(
            vec![RawMessage::text("first"), RawMessage::text("second")],
            vec![],
        );
        let (errors, _) = classify(&result);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].raw_message, "first");
        assert_eq!(errors[1].raw_message, "second");
    }

    #[test]
    fn test_classify_structured_with_module_and_loc() {
        let result = result_with(
            vec![],
            vec![RawMessage::Structured {
                message: "unused var y".to_string(),
                stack: None,
                module_name: Some("src/app.js".to_string()),
                loc: Some("4:7".to_string()),
            }],
        );
        let (_, warnings) = classify(&result);
        assert_eq!(
            warnings[0],
            Diagnostic::located("unused var y", "src/app.js", "4", "7")
        );
    }

    #[test]
    fn test_classify_minifier_stack_extracts_location() {
        let result = result_with(
            vec![RawMessage::Structured {
                message: "main.js from UglifyJs".to_string(),
                stack: Some("Unexpected token: name (y) [./src/app.js:14,6][main.js:1210,12]".to_string()),
                module_name: None,
                loc: None,
            }],
            vec![],
        );
        let (errors, _) = classify(&result);
        assert_eq!(errors[0].source_path.as_deref(), Some("./src/app.js"));
        assert_eq!(errors[0].line.as_deref(), Some("14"));
        assert_eq!(errors[0].column.as_deref(), Some("6"));
    }

    #[test]
    fn test_classify_minifier_stack_fallback_keeps_raw_text() {
        let stack = "something went wrong, no brackets here";
        let result = result_with(
            vec![RawMessage::Structured {
                message: "main.js from Terser".to_string(),
                stack: Some(stack.to_string()),
                module_name: None,
                loc: None,
            }],
            vec![],
        );
        let (errors, _) = classify(&result);
        assert_eq!(errors[0], Diagnostic::text(stack));
    }

    #[test]
    fn test_parse_bracketed_location_exact() {
        let loc = parse_bracketed_location("Unexpected token [./src/x.js:3,15][bundle.js:100,2]");
        assert_eq!(
            loc,
            StackLocation::Structured {
                path: "./src/x.js".to_string(),
                line: "3".to_string(),
                column: "15".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_bracketed_location_windows_path() {
        let loc = parse_bracketed_location("boom [C:\\src\\x.js:3,15][bundle.js:1,1]");
        assert_eq!(
            loc,
            StackLocation::Structured {
                path: "C:\\src\\x.js".to_string(),
                line: "3".to_string(),
                column: "15".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_bracketed_location_requires_second_group() {
        let input = "Unexpected token [./src/x.js:3,15]";
        assert_eq!(
            parse_bracketed_location(input),
            StackLocation::Unstructured(input.to_string())
        );
    }

    #[test]
    fn test_parse_bracketed_location_rejects_non_numeric() {
        let input = "boom [./src/x.js:a,b][rest]";
        assert_eq!(
            parse_bracketed_location(input),
            StackLocation::Unstructured(input.to_string())
        );
    }

    #[test]
    fn test_parse_bracketed_location_no_brackets() {
        let input = "plain old failure text";
        assert_eq!(
            parse_bracketed_location(input),
            StackLocation::Unstructured(input.to_string())
        );
    }

    #[test]
    fn test_diagnostic_display_with_location() {
        let diag = Diagnostic::located("bad token", "src/x.js", "3", "15");
        assert_eq!(diag.to_string(), "src/x.js:3,15\nbad token");
    }

    #[test]
    fn test_diagnostic_display_plain() {
        let diag = Diagnostic::text("Module not found: ./x");
        assert_eq!(diag.to_string(), "Module not found: ./x");
    }

    #[test]
    fn test_from_failure_text_recovers() {
        let diag = Diagnostic::from_failure_text("engine blew up, no location");
        assert_eq!(diag, Diagnostic::text("engine blew up, no location"));

        let diag = Diagnostic::from_failure_text("fatal [./a.js:1,2][b.js:3,4]");
        assert_eq!(diag.source_path.as_deref(), Some("./a.js"));
    }
}
