//! CLI error types.

use rw_config::ConfigError;
use rw_toc::TocError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Toc(#[from] TocError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
