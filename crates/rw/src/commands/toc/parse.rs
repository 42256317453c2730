//! `rw toc parse` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_config::{CliSettings, Config};
use rw_toc::{SiteMap, parse_toc_yaml};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    /// Toc file to parse (overrides config).
    path: Option<PathBuf>,

    /// Print the parsed site-map as JSON.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ParseArgs {
    /// Execute the parse command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the toc is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            toc_path: self.path,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let toc_path = &config.toc_resolved.path;

        tracing::info!(path = %toc_path.display(), "Parsing toc");
        let site_map = parse_toc_yaml(toc_path)?;

        if self.json {
            let mut json = serde_json::to_string_pretty(&site_map)?;
            json.push('\n');
            output.data(&json)?;
            return Ok(());
        }

        output.highlight(&format!("Root: {}", site_map.root().docname));
        for line in summary_lines(&site_map) {
            output.info(&line);
        }
        output.success(&format!("{} is valid", toc_path.display()));
        Ok(())
    }
}

/// Human-readable summary of a site-map.
fn summary_lines(site_map: &SiteMap) -> Vec<String> {
    let mut lines = vec![format!("Documents: {}", site_map.len())];
    for doc in site_map.iter() {
        let toctrees = doc.subtrees.len();
        match &doc.title {
            Some(title) => lines.push(format!("  {} ({title}): {toctrees} toctree(s)", doc.docname)),
            None => lines.push(format!("  {}: {toctrees} toctree(s)", doc.docname)),
        }
    }

    let globs = site_map.globs();
    if !globs.is_empty() {
        lines.push(format!("Globs: {}", globs.len()));
        lines.extend(globs.into_iter().map(|glob| format!("  {glob}")));
    }
    lines
}
