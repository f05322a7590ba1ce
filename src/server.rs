//! Static development server over the engine's output directory.
//!
//! Serving internals are delegated to axum and tower-http; this is only the
//! wiring: bind, spawn, and hand back URLs for the listening banner.

use crate::error::{CliError, Result};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Development server serving the engine's output directory.
pub struct DevServer {
    root: PathBuf,
    host: String,
    port: u16,
}

impl DevServer {
    /// Create a server for the given directory and address.
    pub fn new(root: PathBuf, host: String, port: u16) -> Self {
        Self { root, host, port }
    }

    /// URL for the local machine.
    pub fn local_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    /// URL addressed by the configured host, for other devices.
    pub fn network_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Bind the listener and serve in a background task.
    ///
    /// Returns once the socket is bound (the listen-complete notification);
    /// the returned handle completes only if the server stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind to the configured address.
    pub async fn listen(self) -> Result<tokio::task::JoinHandle<()>> {
        let addr = format!("{}:{}", self.host, self.port);

        let app = Router::new()
            .fallback_service(ServeDir::new(&self.root))
            .layer(
                // Dev server: allow everything
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::debug!(%addr, root = %self.root.display(), "dev server listening");

        Ok(tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                crate::ui::error(&format!("Dev server error: {}", e));
            }
        }))
    }
}
