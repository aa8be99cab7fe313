use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wikidata: WikidataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Wikidata endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WikidataConfig {
    /// Full URL of the MediaWiki action API (`.../w/api.php`).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Sent as the `User-Agent` header; Wikimedia rejects anonymous clients.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_api_url() -> String {
    "https://www.wikidata.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    format!("wikigraph/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in WIKIGRAPH_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory (defaults are used when absent)
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config_path = match std::env::var("WIKIGRAPH_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let local = PathBuf::from("config.toml");
                if !local.exists() {
                    let config = Config::default();
                    config.validate()?;
                    return Ok(config);
                }
                local
            }
        };

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        let api_url = url::Url::parse(&self.wikidata.api_url)
            .with_context(|| format!("wikidata.api_url is not a valid URL: {}", self.wikidata.api_url))?;

        if api_url.scheme() != "http" && api_url.scheme() != "https" {
            anyhow::bail!(
                "wikidata.api_url must use http or https, got: {}",
                api_url.scheme()
            );
        }

        if self.wikidata.user_agent.trim().is_empty() {
            anyhow::bail!("wikidata.user_agent must not be empty");
        }

        Ok(())
    }

    /// Log filter used when RUST_LOG is unset
    pub fn log_level(&self) -> &str {
        &self.logging.log_level
    }
}
