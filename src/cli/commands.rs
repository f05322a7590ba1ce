use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available drover subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a one-shot production build
    ///
    /// Invokes the configured build engine once, reports the outcome, and
    /// prints the engine's own stats summary on success.
    Build(BuildArgs),

    /// Start watch mode with a development server
    ///
    /// Runs the engine in watch mode, serves the output directory over HTTP,
    /// and reports every compile pass as it completes.
    Dev(DevArgs),
}

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Path to the config file (defaults to ./drover.config.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Build engine executable, overriding the config file
    #[arg(long, value_name = "COMMAND")]
    pub engine: Option<String>,

    /// Directory the engine writes its output to
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the dev command
#[derive(Args, Debug, Default)]
pub struct DevArgs {
    /// Path to the config file (defaults to ./drover.config.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Build engine executable, overriding the config file
    #[arg(long, value_name = "COMMAND")]
    pub engine: Option<String>,

    /// Directory the engine writes its output to
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Port for the dev server
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host for the dev server
    #[arg(long)]
    pub host: Option<String>,

    /// Open the browser once the server is listening
    #[arg(long)]
    pub open: bool,
}
