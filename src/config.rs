//! Runtime configuration
//!
//! Read once at startup from `~/.bh-investment/config.yaml` (optional) with
//! the API base URL overridable through `BH_INVESTMENT_API_URL`, then frozen
//! in a process-wide cell.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use crate::constants::{
    API_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_URL, DEFAULT_NOTIFICATION_TTL_MS,
};

static CONFIG: OnceLock<Config> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the API, e.g. `https://bhinvestment.com/api`
    pub api_url: String,
    /// Toast lifetime in milliseconds
    pub notification_ttl_ms: u64,
    /// Overall request timeout; `None` keeps the transport default
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// `~/.bh-investment`, falling back to the working directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// Load from the default location and apply the environment override
    pub fn load() -> Result<Self> {
        let path = Self::config_dir().join(CONFIG_FILE_NAME);
        let config = Self::load_from(&path)?;
        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    /// Load from an explicit file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(path = %path.display(), api_url = %config.api_url, "Loaded config");
        Ok(config)
    }

    /// Replace `api_url` when an override is present and non-blank
    pub fn with_api_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

/// Install the process-wide configuration. Fails if called twice.
pub fn init(config: Config) -> Result<&'static Config> {
    if CONFIG.set(config).is_err() {
        bail!("configuration already initialized");
    }
    match CONFIG.get() {
        Some(config) => Ok(config),
        None => bail!("configuration unavailable after initialization"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url: https://bhinvestment.com/api").unwrap();
        writeln!(file, "request_timeout_secs: 10").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api_url, "https://bhinvestment.com/api");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.notification_ttl_ms, DEFAULT_NOTIFICATION_TTL_MS);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url: [unterminated").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_env_override() {
        let config = Config::default().with_api_url_override(Some("http://10.0.0.2/api".into()));
        assert_eq!(config.api_url, "http://10.0.0.2/api");

        let config = Config::default().with_api_url_override(Some("   ".into()));
        assert_eq!(config.api_url, DEFAULT_API_URL);

        let config = Config::default().with_api_url_override(None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_init_only_once() {
        let first = init(Config::default()).map(|c| c.api_url.clone());
        assert_eq!(first.unwrap(), DEFAULT_API_URL);
        assert!(init(Config::default()).is_err());
        assert_eq!(CONFIG.get().map(|c| c.api_url.as_str()), Some(DEFAULT_API_URL));
    }
}
