//! Client configuration
//!
//! `AppConfig` carries the application identity issued by the open platform.
//! It is usually read from a YAML file of the form:
//!
//! ```yaml
//! feishu:
//!   APP_ID: cli_xxx
//!   APP_SECRET: xxx
//!   VERIFICATION_TOKEN: xxx
//!   ENCRYPT_KEY: xxx
//!   LARK_HOST: https://open.feishu.cn   # optional
//! ```
//!
//! `ClientSettings` holds the transport knobs (timeout, refresh period,
//! optional rate limit) and has sensible defaults.

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default API host
pub const DEFAULT_HOST: &str = "https://open.feishu.cn";

/// Round-trip timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Tenant tokens live for two hours; refresh comfortably inside that
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(105 * 60);

// ============================================================================
// Application Identity
// ============================================================================

/// Application identity and API host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "APP_ID", default)]
    pub app_id: String,

    #[serde(rename = "APP_SECRET", default)]
    pub app_secret: String,

    /// Used by event callbacks in the embedding service
    #[serde(rename = "VERIFICATION_TOKEN", default)]
    pub verification_token: String,

    /// Used by event callbacks in the embedding service
    #[serde(rename = "ENCRYPT_KEY", default)]
    pub encrypt_key: String,

    #[serde(rename = "LARK_HOST", default = "default_host")]
    pub host: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

/// Top-level layout of the YAML config file
#[derive(Debug, Deserialize)]
struct ConfigFile {
    feishu: AppConfig,
}

impl AppConfig {
    /// Create a config with the default host
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            verification_token: String::new(),
            encrypt_key: String::new(),
            host: default_host(),
        }
    }

    /// Override the API host
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config(format!("Config file '{}' not found", path.display()))
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        file.feishu.validate()?;
        Ok(file.feishu)
    }

    /// Load from `FEISHU_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            app_id: lookup("FEISHU_APP_ID").unwrap_or_default(),
            app_secret: lookup("FEISHU_APP_SECRET").unwrap_or_default(),
            verification_token: lookup("FEISHU_VERIFICATION_TOKEN").unwrap_or_default(),
            encrypt_key: lookup("FEISHU_ENCRYPT_KEY").unwrap_or_default(),
            host: lookup("FEISHU_LARK_HOST").unwrap_or_else(default_host),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the fields needed for token issuance are present
    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(Error::missing_field("APP_ID"));
        }
        if self.app_secret.trim().is_empty() {
            return Err(Error::missing_field("APP_SECRET"));
        }
        if self.host.trim().is_empty() {
            return Err(Error::missing_field("LARK_HOST"));
        }
        Ok(())
    }
}

// ============================================================================
// Transport Settings
// ============================================================================

/// Transport settings shared by the token manager and request executor
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Round-trip timeout for every request
    pub timeout: Duration,
    /// Period of the background token refresh
    pub refresh_interval: Duration,
    /// Client-side rate limit, off unless set
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            rate_limit: None,
            user_agent: format!("feishu-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientSettings {
    /// Create a new settings builder
    pub fn builder() -> ClientSettingsBuilder {
        ClientSettingsBuilder::default()
    }
}

/// Builder for client settings
#[derive(Default)]
pub struct ClientSettingsBuilder {
    settings: ClientSettings,
}

impl ClientSettingsBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Set the token refresh period
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.settings.refresh_interval = interval;
        self
    }

    /// Enable client-side rate limiting
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.settings.rate_limit = Some(config);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.settings.user_agent = agent.into();
        self
    }

    /// Build the settings
    pub fn build(self) -> ClientSettings {
        self.settings
    }
}
