//! Configuration module for the hub client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the commands API
    pub api_url: String,
    /// Path where the bearer credential is persisted between runs
    pub token_path: PathBuf,
    /// Transport-level timeout applied to every request
    pub http_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("HUB_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let token_path = env::var("HUB_TOKEN_PATH")
            .unwrap_or_else(|_| "./data/token".to_string())
            .into();

        let timeout_secs: u64 = env::var("HUB_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .expect("Invalid HUB_HTTP_TIMEOUT_SECS format");

        let log_level = env::var("HUB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_url,
            token_path,
            http_timeout: Duration::from_secs(timeout_secs),
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("HUB_API_URL");
        env::remove_var("HUB_TOKEN_PATH");
        env::remove_var("HUB_HTTP_TIMEOUT_SECS");
        env::remove_var("HUB_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.token_path, PathBuf::from("./data/token"));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
    }
}
