//! CLI command implementations.

pub mod build;
pub mod dev;

pub use build::execute as build_execute;
pub use dev::execute as dev_execute;

use crate::cli::{BuildArgs, DevArgs};
use crate::config::CliOverrides;

impl From<&BuildArgs> for CliOverrides {
    fn from(args: &BuildArgs) -> Self {
        Self {
            engine_command: args.engine.clone(),
            out_dir: args.out_dir.clone(),
            ..Default::default()
        }
    }
}

impl From<&DevArgs> for CliOverrides {
    fn from(args: &DevArgs) -> Self {
        Self {
            engine_command: args.engine.clone(),
            out_dir: args.out_dir.clone(),
            host: args.host.clone(),
            port: args.port,
            open: args.open,
        }
    }
}
