// Configuration Management
//
// This crate handles all configuration loading for the travel buddy api.
// It provides:
// - Configuration structs and deserialization
// - File and environment loading logic
// - Default configuration values
//
// The completion API key is the only required setting. Its absence is a
// startup failure, never a runtime one.

use std::path::Path;
use thiserror::Error;

pub mod types;

// Re-export all configuration types
pub use types::*;

/// Environment variable holding the completion endpoint bearer token
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is missing. Set it in the environment or the configuration file")]
    MissingApiKey,

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("Failed to read configuration file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[from]
        source: serde_yaml::Error,
    },
}

/// Main configuration loading interface
impl ApiConfig {
    /// Load configuration from a YAML file.
    ///
    /// A non-empty `GROQ_API_KEY` in the environment replaces whatever key the
    /// file carries.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: ApiConfig = serde_yaml::from_str(&content)?;

        if let Some(key) = api_key_from_env() {
            config.completion.api_key = key;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations, falling back to the environment
    pub fn load() -> Result<Self, ConfigError> {
        let config_paths = ["config/config.yaml", "config.yaml", "config/default.yaml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                return Self::load_from_file(path);
            }
        }

        Self::from_env()
    }

    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.completion.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.completion.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "completion.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

pub(crate) fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}
