use serde::Deserialize;
use std::{collections::HashMap, env, fmt, str::FromStr};

use crate::{api_key_from_env, ConfigError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub completion: CompletionConfig,
    pub logging: LoggingConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            server: ServerConfig::from_env()?,
            completion: CompletionConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("SERVER_PORT", 3000)?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Chat-completion endpoint settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Upper bound on a whole request, including reading a streamed body
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl CompletionConfig {
    /// Load from environment variables. Fails fast when the API key is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = api_key_from_env().ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            base_url: env::var("COMPLETION_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key,
            model: env::var("COMPLETION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout_seconds: parse_env("COMPLETION_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS)?,
            connect_timeout_seconds: parse_env(
                "COMPLETION_CONNECT_TIMEOUT_SECONDS",
                DEFAULT_CONNECT_TIMEOUT_SECONDS,
            )?,
        })
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
        }
    }
}

// Keeps the bearer token out of logs
impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

/// Logging Configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut modules = HashMap::new();

        // Load module-specific log levels
        if let Ok(level) = env::var("LOG_MODULE_API") {
            modules.insert("api".to_string(), level);
        }
        if let Ok(level) = env::var("LOG_MODULE_SERVICES") {
            modules.insert("services".to_string(), level);
        }
        if let Ok(level) = env::var("LOG_MODULE_INFERENCE_PROVIDERS") {
            modules.insert("inference_providers".to_string(), level);
        }

        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            modules,
        }
    }

    /// Build an `EnvFilter` directive string such as `info,services=debug`
    pub fn filter_directive(&self) -> String {
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort();

        let mut filter = self.level.clone();
        for (module, level) in modules {
            filter.push_str(&format!(",{module}={level}"));
        }
        filter
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            modules: HashMap::new(),
        }
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::API_KEY_ENV;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            API_KEY_ENV,
            "COMPLETION_BASE_URL",
            "COMPLETION_MODEL",
            "COMPLETION_TIMEOUT_SECONDS",
            "COMPLETION_CONNECT_TIMEOUT_SECONDS",
            "SERVER_HOST",
            "SERVER_PORT",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();
        let err = ApiConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_blank_api_key() {
        clear_env();
        env::set_var(API_KEY_ENV, "   ");
        let err = CompletionConfig::from_env().unwrap_err();
        clear_env();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        env::set_var(API_KEY_ENV, "gsk-test");
        let config = ApiConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.completion.api_key, "gsk-test");
        assert_eq!(config.completion.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.completion.model, DEFAULT_MODEL);
        assert_eq!(config.completion.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port() {
        clear_env();
        env::set_var(API_KEY_ENV, "gsk-test");
        env::set_var("SERVER_PORT", "not-a-port");
        let err = ApiConfig::from_env().unwrap_err();
        clear_env();

        match err {
            ConfigError::InvalidValue { name, .. } => assert_eq!(name, "SERVER_PORT"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = CompletionConfig {
            api_key: "gsk-secret".to_string(),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("gsk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_filter_directive_is_sorted() {
        let mut modules = HashMap::new();
        modules.insert("services".to_string(), "debug".to_string());
        modules.insert("api".to_string(), "trace".to_string());
        let logging = LoggingConfig {
            level: "warn".to_string(),
            format: "json".to_string(),
            modules,
        };

        assert_eq!(logging.filter_directive(), "warn,api=trace,services=debug");
    }
}
