//! `rw toc normalize` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_config::{CliSettings, Config};
use rw_toc::{create_toc_yaml, parse_toc_yaml};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc normalize command.
#[derive(Args)]
pub(crate) struct NormalizeArgs {
    /// Toc file to normalize (overrides config).
    path: Option<PathBuf>,

    /// Write toctree options even when they equal their defaults.
    #[arg(long)]
    keep_defaults: bool,

    /// Write the result to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl NormalizeArgs {
    /// Execute the normalize command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the toc is invalid, or the
    /// output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            toc_path: self.path,
            skip_defaults: self.keep_defaults.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let site_map = parse_toc_yaml(&config.toc_resolved.path)?;
        let yaml = create_toc_yaml(&site_map, config.toc_resolved.skip_defaults)?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, yaml)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.data(&yaml)?,
        }
        Ok(())
    }
}
