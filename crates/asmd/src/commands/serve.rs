//! `asmd serve` command implementation.

use std::path::PathBuf;

use asmd_config::{CliSettings, Config};
use asmd_server::{run_server, server_config_from_config};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover asmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding one content root per subdomain (overrides config).
    #[arg(long, env = "ASMD_PUB_DIR")]
    pub_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Content root used when the request host names no existing one.
    #[arg(long)]
    default_subdomain: Option<String>,

    /// Enable verbose output (request tracing and degraded page sections).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Configuration overrides given on the command line.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            pub_dir: self.pub_dir.clone(),
            default_subdomain: self.default_subdomain.clone(),
        }
    }

    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        output.listening(&config.server.host, config.server.port);
        if let Some(path) = &config.config_path {
            output.setting("Config file", path.display());
        }
        output.setting("Pub directory", config.content_resolved.pub_dir.display());
        output.setting(
            "Default subdomain",
            &config.content_resolved.default_subdomain,
        );
        output.setting("Index document", &config.content_resolved.index_filename);

        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
