//! SAL report binary
//!
//! Reads a project file and prints the report of one checkpoint as JSON on
//! standard output. Logs go to standard error.
//!
//! # Usage
//!
//! ```bash
//! # Report the active checkpoint of ./project.json
//! cargo run --bin sal-report
//!
//! # Report SAL 2 of another project, with JSON logs
//! SAL_CHECKPOINT=2 SAL_LOG_JSON=true cargo run --bin sal-report -- site.json
//! ```
//!
//! # Environment Variables
//!
//! * `SAL_PROJECT_FILE` - Project file (default: project.json); the first argument overrides it
//! * `SAL_CHECKPOINT` - SAL number to report (default: the active one)
//! * `SAL_TIMEZONE` - Site timezone (default: Europe/Rome)
//! * `SAL_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `SAL_LOG_JSON` - Emit logs as JSON lines (default: false)

use anyhow::Context;
use interface_cli::{CliConfig, Project, SalReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let mut config = CliConfig::from_env().context("Failed to load SAL_ configuration")?;
    if let Some(path) = std::env::args().nth(1) {
        config.project_file = path.into();
    }

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(project = %config.project_file.display(), "Building SAL report");

    let project = Project::load(&config.project_file)
        .with_context(|| format!("Failed to load {}", config.project_file.display()))?;
    let report = SalReport::build(&project, config.checkpoint, config.timezone.today())?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initializes the tracing subscriber on standard error
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
