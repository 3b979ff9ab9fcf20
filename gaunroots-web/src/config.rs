//! Frontend configuration module
//!
//! Settings are baked in at compile time; the API base is resolved against
//! the page origin at startup.

/// Default time a notification stays on screen.
pub const DEFAULT_TOAST_DURATION_MS: u32 = 5_000;

/// Frontend configuration for the API location and notification timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// API root; either a path on the page origin or an absolute URL
    pub api_path: String,
    /// How long toasts stay visible before dismissing themselves
    pub toast_duration_ms: u32,
    /// Default logging directive for the console subscriber
    pub log_level: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            api_path: option_env!("GAUNROOTS_API_PATH")
                .unwrap_or("/api")
                .to_string(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            log_level: option_env!("GAUNROOTS_LOG_LEVEL")
                .unwrap_or("info")
                .to_string(),
        }
    }
}

impl WebConfig {
    /// Create a new frontend configuration instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute API base for a page served from `origin`.
    #[must_use]
    pub fn api_base_url(&self, origin: &str) -> String {
        if self.api_path.starts_with("http://") || self.api_path.starts_with("https://") {
            return self.api_path.clone();
        }
        format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            self.api_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(api_path: &str) -> WebConfig {
        WebConfig {
            api_path: api_path.to_string(),
            ..WebConfig::default()
        }
    }

    #[test]
    fn test_web_config_default() {
        let config = WebConfig::new();
        assert!(!config.api_path.is_empty());
        assert_eq!(config.toast_duration_ms, DEFAULT_TOAST_DURATION_MS);
    }

    #[test]
    fn test_relative_api_path_joins_origin() {
        let config = config_with("/api");
        assert_eq!(
            config.api_base_url("http://localhost:8000"),
            "http://localhost:8000/api"
        );
        assert_eq!(
            config.api_base_url("https://gaunroots.example/"),
            "https://gaunroots.example/api"
        );
    }

    #[test]
    fn test_absolute_api_path_is_kept() {
        let config = config_with("https://api.gaunroots.example/api");
        assert_eq!(
            config.api_base_url("http://localhost:8000"),
            "https://api.gaunroots.example/api"
        );
    }
}
