//! Command-line interface definition for drover.
//!
//! Complete CLI structure using clap v4's derive macros.
//!
//! # Command Structure
//!
//! - `drover build` - One-shot production build through the external engine
//! - `drover dev` - Watch mode with dev server

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, Command, DevArgs};

/// Drover - drive an external bundler with friendly terminal reporting
#[derive(Parser, Debug)]
#[command(
    name = "drover",
    version,
    about = "Drive an external bundler with friendly terminal reporting",
    long_about = "Drover wraps an external build engine: it runs one-shot production builds\n\
                  or a watch/dev-server session, and turns the engine's raw compile results\n\
                  into concise, colorized status reports."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
