//! Drover - terminal front-end for an external bundler.
//!
//! Main entry point: argument parsing, logging initialization, and command
//! dispatch between one-shot and watch modes.

use clap::Parser;
use drover::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();

    // Execute the appropriate command
    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Dev(dev_args) => commands::dev_execute(dev_args).await,
    };

    // Convert CLI errors to miette diagnostics for terminal rendering
    result.map_err(error::cli_error_to_miette)
}
