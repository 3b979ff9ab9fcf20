use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use thiserror::Error;
use url::Url;

pub const ENV_BASE_URL: &str = "GAUNROOTS_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "GAUNROOTS_LOG_LEVEL";
pub const ENV_SESSION_PATH: &str = "GAUNROOTS_SESSION_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported configuration format. Use 'yaml' or 'json'.")]
    UnsupportedFormat,
    #[error("Invalid base URL '{0}': must be an absolute http(s) URL")]
    InvalidBaseUrl(String),
}

/// Settings for native clients of the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend API root, including the `/api` prefix.
    pub base_url: String,

    /// Default logging directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Where the session record is persisted; the platform config dir when unset.
    pub session_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            log_level: "info".to_string(),
            session_path: None,
        }
    }

    /// Loads the configuration from a file, the process environment, and an
    /// optional base URL override, in increasing order of precedence.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or the resulting
    /// base URL is not an absolute http(s) URL.
    pub fn load_config(
        config_path: Option<PathBuf>,
        base_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, base_url_override, |key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::load_config`], reading variables through `lookup`.
    ///
    /// # Errors
    /// See [`ClientConfig::load_config`].
    pub fn load_with_env<F>(
        config_path: Option<PathBuf>,
        base_url_override: Option<String>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::with_defaults();
        let mut config = defaults.clone();

        if let Some(path) = config_path {
            let content = fs::read_to_string(&path)?;
            config = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => serde_yml::from_str(&content)?,
                Some("json") => serde_json::from_str(&content)?,
                _ => return Err(ConfigError::UnsupportedFormat),
            };
        }

        // Environment only fills values the file left at their defaults.
        if config.base_url == defaults.base_url {
            if let Some(base_url) = lookup(ENV_BASE_URL) {
                config.base_url = base_url;
            }
        }
        if config.log_level == defaults.log_level {
            if let Some(level) = lookup(ENV_LOG_LEVEL) {
                config.log_level = level;
            }
        }
        if config.session_path.is_none() {
            config.session_path = lookup(ENV_SESSION_PATH).map(PathBuf::from);
        }

        if let Some(base_url) = base_url_override {
            config.base_url = base_url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url().map(|_| ())
    }

    /// The base URL parsed into a [`Url`].
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] when it does not parse or is not http(s).
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(self.base_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(url)
    }
}
