//! RW CLI - Table of contents tool.
//!
//! Provides commands for:
//! - `toc parse`: Validate a toc file and summarize its site-map
//! - `toc normalize`: Re-write a toc file in its minimal form

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::TocCommand;
use output::Output;

/// RW - Table of contents tool.
#[derive(Parser)]
#[command(name = "rw", version, about)]
struct Cli {
    /// Enable verbose output (show parsing logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Table of contents commands.
    #[command(subcommand)]
    Toc(TocCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Toc(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
