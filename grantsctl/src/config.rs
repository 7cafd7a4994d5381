use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use humantime::parse_duration;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use client::ClientConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

fn default_timeout() -> String {
    "5s".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub domain: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub credentials_file: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::Io)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.domain.trim().is_empty() {
            return Err(ConfigError::Validation("domain cannot be empty".to_string()));
        }
        match (&self.token, &self.credentials_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(
                    "token and credentials_file are mutually exclusive".to_string(),
                ));
            }
            (None, None) => {
                return Err(ConfigError::Validation(
                    "either token or credentials_file is required".to_string(),
                ));
            }
            (Some(_), None) | (None, Some(_)) => {}
        }
        self.timeout_duration()?;
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            ConfigError::Validation(format!("invalid log_level '{}': {e}", self.log_level))
        })?;
        Ok(())
    }

    pub fn timeout_duration(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.timeout).map_err(|e| {
            ConfigError::Validation(format!("invalid timeout '{}': {e}", self.timeout))
        })
    }

    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let config = match (&self.token, &self.credentials_file) {
            (Some(token), _) => ClientConfig::from_token(&self.domain, token),
            (None, Some(file)) => ClientConfig::from_file(&self.domain, file),
            (None, None) => {
                return Err(ConfigError::Validation(
                    "either token or credentials_file is required".to_string(),
                ));
            }
        };
        Ok(config.timeout(self.timeout_duration()?))
    }

    /// Logs go to stderr so that `--json` output stays parseable.
    /// `RUST_LOG` takes precedence over `log_level`.
    pub fn init_logger(&self) {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }
}
