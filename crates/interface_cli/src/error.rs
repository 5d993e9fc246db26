//! CLI error handling

use std::path::PathBuf;

use domain_sal::SalError;
use thiserror::Error;

/// Errors surfaced by the reporting surface
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read project file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid project file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("SAL {0} does not exist")]
    UnknownCheckpoint(u32),

    #[error(transparent)]
    Sal(#[from] SalError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
