//! asmd CLI - Markdown directory server.
//!
//! Provides commands for:
//! - `serve`: Serve a tree of Markdown files over HTTP

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ServeArgs;
use error::CliError;
use output::Output;

/// asmd - Markdown directory server.
#[derive(Parser)]
#[command(name = "asmd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the content server.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute())),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}

/// `--verbose` forces INFO, otherwise `RUST_LOG` applies with WARN as default.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
