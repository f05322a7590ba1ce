//! Subprocess-backed build engine.
//!
//! Spawns the configured bundler executable and speaks a small JSON protocol
//! with it:
//!
//! - One-shot: the engine writes a single compile-result JSON document to
//!   stdout (the last parseable content wins, so engines may log freely
//!   before it).
//! - Watch: the engine writes newline-delimited JSON events,
//!   `{"event":"start"}` and `{"event":"done","result":{...}}`. Unparseable
//!   lines are engine noise and are skipped.

use crate::config::EngineConfig;
use crate::engine::{BuildEngine, CompileEvent, RawCompileResult};
use crate::error::EngineError;
use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Build engine backed by an external command.
pub struct CommandEngine {
    command: String,
    args: Vec<String>,
    watch_args: Vec<String>,
}

impl CommandEngine {
    /// Create an engine from its configuration section.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            watch_args: config.watch_args.clone(),
        }
    }
}

#[async_trait]
impl BuildEngine for CommandEngine {
    async fn run_once(&mut self) -> Result<RawCompileResult, EngineError> {
        tracing::debug!(command = %self.command, args = ?self.args, "running engine");

        let output = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| EngineError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        // An exit failure with a parseable result is still a completed
        // compile pass; engines conventionally exit nonzero on compile
        // errors.
        if let Some(result) = parse_result_text(&stdout) {
            return Ok(result);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = combine_output(&stdout, &stderr);
        if output.status.success() {
            Err(EngineError::Protocol(detail))
        } else {
            Err(EngineError::Crashed(detail))
        }
    }

    async fn watch(&mut self) -> Result<mpsc::Receiver<CompileEvent>, EngineError> {
        tracing::debug!(command = %self.command, args = ?self.watch_args, "starting engine in watch mode");

        let mut child = Command::new(&self.command)
            .args(&self.watch_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Protocol("engine stdout not captured".to_string()))?;

        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                match parse_watch_line(&line) {
                    Some(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    None => {
                        if !line.trim().is_empty() {
                            tracing::debug!(line = %line, "skipping non-event engine output");
                        }
                    }
                }
            }

            match child.wait().await {
                Ok(status) => tracing::debug!(%status, "engine exited"),
                Err(e) => tracing::warn!(error = %e, "failed to reap engine process"),
            }
            // Dropping tx closes the event stream.
        });

        Ok(rx)
    }
}

/// Wire shape of a single watch-mode event line.
#[derive(Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum WatchEvent {
    Start,
    Done {
        #[serde(default)]
        result: RawCompileResult,
    },
}

/// Parse one watch-mode stdout line into a compile event.
fn parse_watch_line(line: &str) -> Option<CompileEvent> {
    let event: WatchEvent = serde_json::from_str(line.trim()).ok()?;
    Some(match event {
        WatchEvent::Start => CompileEvent::Started,
        WatchEvent::Done { result } => CompileEvent::Done(result),
    })
}

/// Extract a compile result from one-shot stdout.
///
/// Tries the full text first, then the last non-empty line, so engines that
/// log progress before the final JSON document still parse.
fn parse_result_text(stdout: &str) -> Option<RawCompileResult> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(result) = serde_json::from_str(trimmed) {
        return Some(result);
    }

    let last_line = trimmed.lines().rev().find(|l| !l.trim().is_empty())?;
    serde_json::from_str(last_line.trim()).ok()
}

/// Merge stdout and stderr into one failure detail blob.
fn combine_output(stdout: &str, stderr: &str) -> String {
    let stdout = stdout.trim();
    let stderr = stderr.trim();
    match (stdout.is_empty(), stderr.is_empty()) {
        (true, true) => "(no output)".to_string(),
        (false, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{}\n{}", stderr, stdout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RawMessage;

    #[test]
    fn test_parse_result_whole_document() {
        let out = r#"{"errors": [], "warnings": [], "stats": "ok"}"#;
        let result = parse_result_text(out).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.stats.as_deref(), Some("ok"));
    }

    #[test]
    fn test_parse_result_last_line_after_noise() {
        let out = "compiling...\nalmost done\n{\"errors\":[\"boom\"]}\n";
        let result = parse_result_text(out).unwrap();
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_parse_result_garbage_is_none() {
        assert!(parse_result_text("").is_none());
        assert!(parse_result_text("not json at all").is_none());
    }

    #[test]
    fn test_parse_watch_line_start() {
        let event = parse_watch_line(r#"{"event":"start"}"#).unwrap();
        assert!(matches!(event, CompileEvent::Started));
    }

    #[test]
    fn test_parse_watch_line_done() {
        let line = r#"{"event":"done","result":{"errors":[],"warnings":["unused var y"]}}"#;
        let event = parse_watch_line(line).unwrap();
        match event {
            CompileEvent::Done(result) => {
                assert!(matches!(
                    &result.warnings[0],
                    RawMessage::Text(s) if s == "unused var y"
                ));
            }
            other => panic!("expected done event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_watch_line_noise_skipped() {
        assert!(parse_watch_line("webpack 5.90 compiled").is_none());
        assert!(parse_watch_line("").is_none());
    }

    #[test]
    fn test_combine_output() {
        assert_eq!(combine_output("", ""), "(no output)");
        assert_eq!(combine_output("out", ""), "out");
        assert_eq!(combine_output("", "err"), "err");
        assert_eq!(combine_output("out", "err"), "err\nout");
    }
}
