//! Logging infrastructure for the drover CLI.
//!
//! Structured logging setup using the `tracing` ecosystem with verbosity
//! flags, color control, and `RUST_LOG` overrides.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the specified options.
///
/// Should be called once at the start of the program, before any logging
/// occurs.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging (overrides `quiet`)
/// * `quiet` - Only show error-level logs
/// * `no_color` - Disable colored output
///
/// # Verbosity Levels
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: Sets level to DEBUG for drover
/// 2. `--quiet` flag: Sets level to ERROR only
/// 3. `RUST_LOG` environment variable: Custom filter
/// 4. Default: INFO level for drover
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("drover=debug")
    } else if quiet {
        EnvFilter::new("drover=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("drover=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false) // Don't show the module path (keeps output clean)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
