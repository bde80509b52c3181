//! HTTP server for asmd.
//!
//! This crate provides a native Rust HTTP server using axum that serves a
//! tree of Markdown files:
//! - Markdown files and directory index documents as rendered HTML pages
//! - Every other file as raw bytes
//! - One content root per subdomain, selected by the request host
//!
//! # Quick Start
//!
//! ```ignore
//! use asmd_server::{ServerConfig, run_server};
//! use asmd_site::ContentLayout;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8080,
//!         layout: ContentLayout::new("pub"),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (asmd-server)
//!                        │
//!                        └─► content handler ──spawn_blocking──► PathResolver
//!                                                                   │
//!                                     ┌─────────────────────────────┤
//!                                     ▼                             ▼
//!                               PageRenderer                  raw file bytes
//!                     (TreeBuilder + navbar + Markdown)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use asmd_renderer::MarkdownRenderer;
use asmd_site::{ContentLayout, PageRenderer, PathResolver};
use axum::Router;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content layout (pub directory, default subdomain, reserved names).
    pub layout: ContentLayout,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            layout: ContentLayout::default(),
        }
    }
}

/// Build the application router for `config`.
///
/// Exposed so the router can be driven without binding a socket.
pub fn router(config: &ServerConfig) -> Router {
    let converter = Arc::new(MarkdownRenderer::new().with_external_links_in_new_tab(true));
    let state = Arc::new(AppState {
        resolver: PathResolver::new(config.layout.clone()),
        renderer: PageRenderer::new(converter, config.layout.clone()),
    });
    app::create_router(state)
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !config.layout.pub_dir.is_dir() {
        tracing::warn!(
            pub_dir = %config.layout.pub_dir.display(),
            "Content directory does not exist, every request will be not found"
        );
    }

    let app = router(&config);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from asmd config.
#[must_use]
pub fn server_config_from_config(config: &asmd_config::Config) -> ServerConfig {
    let content = &config.content_resolved;
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        layout: ContentLayout {
            pub_dir: content.pub_dir.clone(),
            default_subdomain: content.default_subdomain.clone(),
            index_filename: content.index_filename.clone(),
            assets_dir: content.assets_dir.clone(),
        },
    }
}
