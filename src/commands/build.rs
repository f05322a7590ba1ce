//! Build command implementation.
//!
//! One-shot mode: run the engine once, report the outcome, surface compile
//! failures to the caller as a nonzero exit.

use crate::cli::BuildArgs;
use crate::config::{CliOverrides, DroverConfig};
use crate::engine::{BuildEngine, CommandEngine};
use crate::error::{CliError, Result};
use crate::report::{BuildOutcome, BuildSession, Reporter, SessionMode};
use crate::ui;
use std::time::Instant;

/// Execute the build command.
///
/// # Errors
///
/// Returns errors for invalid configuration, an engine that fails to run,
/// and compile failures (after the session has rendered the report).
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let overrides = CliOverrides::from(&args);
    let config = DroverConfig::load(args.config.as_deref(), &overrides)?;
    config.validate()?;

    tracing::debug!(command = %config.engine.command, "using build engine");

    let mut engine = CommandEngine::new(&config.engine);
    let mut session = BuildSession::new(Reporter::new(), SessionMode::OneShot);

    session.compile_started();
    match engine.run_once().await {
        Ok(result) => {
            let outcome = session.compile_done(&result);
            if let BuildOutcome::Failure(errors) = outcome {
                return Err(CliError::BuildFailed {
                    count: errors.len(),
                });
            }
        }
        Err(err) => {
            // Engine-fatal: the engine itself could not run. Rendered through
            // the session's fallback printer, then surfaced to the caller.
            session.engine_failed(&err.to_string());
            return Err(err.into());
        }
    }

    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(start_time.elapsed())
    ));

    Ok(())
}
