//! CLI configuration

use std::path::PathBuf;

use core_kernel::Timezone;
use serde::Deserialize;

use crate::error::CliError;

/// Reporting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Project file to report on
    pub project_file: PathBuf,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Site timezone, decides "today" when no checkpoint exists
    pub timezone: Timezone,
    /// SAL number to report; the active checkpoint when absent
    pub checkpoint: Option<u32>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            project_file: PathBuf::from("project.json"),
            log_level: "info".to_string(),
            log_json: false,
            timezone: Timezone::default(),
            checkpoint: None,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `SAL_`-prefixed environment variables
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_source(config::Environment::with_prefix("SAL"))
    }

    /// Loads configuration from any `config` source, falling back to defaults
    pub fn from_source<S>(source: S) -> Result<Self, CliError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Ok(config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("SAL").source(Some(map))
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = CliConfig::from_source(env(&[])).unwrap();
        assert_eq!(config.project_file, PathBuf::from("project.json"));
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.timezone, Timezone::default());
        assert_eq!(config.checkpoint, None);
    }

    #[test]
    fn test_prefixed_variables() {
        let config = CliConfig::from_source(env(&[
            ("SAL_PROJECT_FILE", "/srv/site/cantiere.json"),
            ("SAL_LOG_JSON", "true"),
            ("SAL_TIMEZONE", "Europe/Zurich"),
            ("SAL_CHECKPOINT", "3"),
        ]))
        .unwrap();

        assert_eq!(config.project_file, PathBuf::from("/srv/site/cantiere.json"));
        assert!(config.log_json);
        assert_eq!(config.timezone, "Europe/Zurich".parse::<Timezone>().unwrap());
        assert_eq!(config.checkpoint, Some(3));
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let result = CliConfig::from_source(env(&[("SAL_TIMEZONE", "Mars/Olympus")]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
