use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{GiftGenixError, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const BASE_URL_ENV: &str = "GIFTGENIX_API_URL";
pub const TIMEOUT_ENV: &str = "GIFTGENIX_TIMEOUT_SECONDS";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means requests may stay pending indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// `base_url` joined with `path`, without doubled slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Values given on the command line. They win over the environment and the
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            GiftGenixError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(raw).map_err(|e| GiftGenixError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// File (or defaults), then environment, then command-line values.
    pub fn load<F>(path: Option<&Path>, lookup: F, overrides: &Overrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(lookup)?.with_overrides(overrides)
    }

    /// Defaults overridden by `GIFTGENIX_API_URL` and `GIFTGENIX_TIMEOUT_SECONDS`.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let seconds = raw.trim().parse::<u64>().map_err(|e| {
                GiftGenixError::Config(format!("invalid {TIMEOUT_ENV} value '{raw}': {e}"))
            })?;
            self.api.timeout_seconds = Some(seconds);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(url) = &overrides.base_url {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(seconds) = overrides.timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(GiftGenixError::Config(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(GiftGenixError::Config(format!(
                "api.base_url must start with http:// or https://, got '{base}'"
            )));
        }
        if self.api.timeout_seconds == Some(0) {
            return Err(GiftGenixError::Config(
                "api.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
