//! Dev command implementation.
//!
//! Watch mode: start the dev server, run the engine in watch mode, and keep
//! reporting compile passes until Ctrl+C.

use crate::cli::DevArgs;
use crate::config::{CliOverrides, DroverConfig};
use crate::engine::{BuildEngine, CommandEngine};
use crate::error::{Result, ResultExt};
use crate::report::{BuildSession, ListenBanner, Reporter, SessionMode};
use crate::server::DevServer;
use crate::ui;
use tokio::signal;

/// Execute the dev command.
///
/// # Process Flow
///
/// 1. Load and validate configuration
/// 2. Start the static dev server over the output directory
/// 3. Open the browser if requested
/// 4. Start the engine in watch mode
/// 5. Event loop: report each compile pass; Ctrl+C stops everything
///
/// # Errors
///
/// Returns errors for invalid configuration, a server that cannot bind, and
/// an engine that fails to start.
pub async fn execute(args: DevArgs) -> Result<()> {
    ui::info("Starting development server...");

    let overrides = CliOverrides::from(&args);
    let config = DroverConfig::load(args.config.as_deref(), &overrides)?;
    config.validate()?;

    let server = DevServer::new(
        config.out_dir.clone(),
        config.dev_server.host.clone(),
        config.dev_server.port,
    );
    let local_url = server.local_url();
    let network_url = server.network_url();
    let mut server_handle = server.listen().await.with_hint(format!(
        "Is port {} already in use? Pick another with --port",
        config.dev_server.port
    ))?;

    let mut session = BuildSession::new(Reporter::new(), SessionMode::Watch);
    session.announce_listening(ListenBanner {
        local_url: local_url.clone(),
        network_url,
    });

    if config.dev_server.open {
        open_browser(&local_url);
    }

    let mut engine = CommandEngine::new(&config.engine);
    let mut events = engine.watch().await?;

    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            // Compile-lifecycle event from the engine
            event = events.recv() => {
                match event {
                    Some(event) => {
                        let _ = session.handle_event(event);
                    }
                    None => {
                        ui::warning("Build engine exited");
                        break;
                    }
                }
            }

            // Ctrl+C received
            _ = signal::ctrl_c() => {
                ui::info("Shutting down development server...");
                break;
            }

            // Server task completed (error or shutdown)
            _ = &mut server_handle => {
                ui::warning("Server task completed unexpectedly");
                break;
            }
        }
    }

    ui::success("Development server stopped");
    Ok(())
}

/// Open the server URL in the default browser.
///
/// Uses platform-specific commands:
/// - macOS: `open`
/// - Windows: `start`
/// - Linux: `xdg-open`
fn open_browser(url: &str) {
    use std::process::Command;

    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    match result {
        Ok(_) => ui::info(&format!("Opened browser at {}", url)),
        Err(e) => ui::warning(&format!("Failed to open browser: {}", e)),
    }
}
