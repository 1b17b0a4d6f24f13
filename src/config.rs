//! Configuration for wellscrape

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::scraping::fetcher::{FetchConfig, DEFAULT_BASE_URL};

/// Main configuration, loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scraper configuration
    #[serde(default)]
    pub scraper: ScraperConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// HTTP read API configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all fields, collecting every error so the user can fix
    /// the file in one pass.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.scraper.max_retries == 0 {
            errors.push("scraper.max_retries must be at least 1".to_string());
        }
        if self.scraper.workers == 0 {
            errors.push("scraper.workers must be at least 1".to_string());
        }
        if self.scraper.request_timeout_secs == 0 {
            errors.push("scraper.request_timeout_secs must be positive".to_string());
        }
        if !self.scraper.base_url.contains("{api}") {
            errors.push("scraper.base_url must contain an {api} placeholder".to_string());
        }
        if self.http.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(format!(
                "http.listen_addr '{}' is not a valid socket address",
                self.http.listen_addr
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Configuration errors:\n  - {}", errors.join("\n  - "));
        }
    }
}

/// Scraper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Well detail URL template with an `{api}` placeholder
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum fetch attempts per identifier
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff in seconds; attempt n sleeps base * 2^(n-1)
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Worker count for parallel runs
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Delay between requests in sequential runs (milliseconds)
    #[serde(default = "default_sequential_delay")]
    pub sequential_delay_ms: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_backoff_secs() -> u64 {
    1
}

fn default_request_timeout() -> u64 {
    30
}

fn default_workers() -> usize {
    5
}

fn default_sequential_delay() -> u64 {
    1000
}

fn default_user_agent() -> String {
    concat!("wellscrape/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_retries: default_max_retries(),
            backoff_secs: default_backoff_secs(),
            request_timeout_secs: default_request_timeout(),
            workers: default_workers(),
            sequential_delay_ms: default_sequential_delay(),
            user_agent: default_user_agent(),
        }
    }
}

impl ScraperConfig {
    /// Fetcher settings derived from this configuration.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.clone(),
            max_retries: self.max_retries,
            backoff_factor: Duration::from_secs(self.backoff_secs),
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/wells.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// HTTP read API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Enable permissive CORS
    #[serde(default)]
    pub cors_enabled: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors_enabled: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.scraper.max_retries, 5);
        assert_eq!(config.scraper.backoff_secs, 1);
        assert_eq!(config.http.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.storage.db_path, PathBuf::from("data/wells.db"));
    }

    #[test]
    fn partial_toml_overrides() {
        let config: Config = toml::from_str(
            r#"
            [scraper]
            max_retries = 2
            workers = 10

            [http]
            listen_addr = "0.0.0.0:9000"
            cors_enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(config.scraper.max_retries, 2);
        assert_eq!(config.scraper.workers, 10);
        assert_eq!(config.scraper.sequential_delay_ms, 1000);
        assert!(config.http.cors_enabled);
    }

    #[test]
    fn validation_collects_all_errors() {
        let mut config = Config::default();
        config.scraper.max_retries = 0;
        config.scraper.workers = 0;
        config.http.listen_addr = "not an address".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_retries"));
        assert!(err.contains("workers"));
        assert!(err.contains("listen_addr"));
    }

    #[test]
    fn base_url_requires_placeholder() {
        let mut config = Config::default();
        config.scraper.base_url = "https://example.com/wells".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn fetch_config_conversion() {
        let scraper = ScraperConfig {
            backoff_secs: 2,
            request_timeout_secs: 10,
            ..ScraperConfig::default()
        };
        let fetch = scraper.fetch_config();
        assert_eq!(fetch.backoff_factor, Duration::from_secs(2));
        assert_eq!(fetch.timeout, Duration::from_secs(10));
        assert_eq!(fetch.max_retries, 5);
    }
}
