//! Service configuration loaded from TOML.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the
//! keys it wants to change:
//!
//! ```toml
//! [server]
//! port = 10369
//!
//! [search]
//! timeout_seconds = 5
//! ```

use std::path::{Path, PathBuf};

use mcmod_search::config::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use mcmod_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MCMOD_API_CONFIG";

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Upstream search settings.
    pub search: UpstreamConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind. `0` picks a free port.
    pub port: u16,
    /// Hard deadline for a whole request, in seconds. The search is
    /// cancelled when it expires.
    pub request_timeout_seconds: u64,
    /// Public URL advertised in the API documentation payload.
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 10369,
            request_timeout_seconds: 15,
            public_base_url: "http://127.0.0.1:10369/".to_owned(),
        }
    }
}

/// Upstream search settings, mapped onto [`SearchConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and host of the upstream search site.
    pub base_url: String,
    /// Upper bound on the upstream fetch, in seconds.
    pub timeout_seconds: u64,
    /// User-Agent header sent upstream.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_seconds: 8,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl UpstreamConfig {
    /// Convert to the search crate's configuration.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Returns the default config file path: `~/.config/mcmod-api/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("mcmod-api").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("mcmod-api")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/mcmod-api-config/config.toml")
        }
    }

    /// Resolve the configuration for this process.
    ///
    /// Uses the file named by [`CONFIG_ENV_VAR`] if set (it must exist),
    /// otherwise the default path if a file is there, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load() -> crate::error::Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        let path = Self::default_config_path();
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the server section is invalid, or the
    /// search crate's validation error for the search section.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(ApiError::Config("server.host must not be empty".into()));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ApiError::Config(
                "server.request_timeout_seconds must be greater than 0".into(),
            ));
        }
        self.search.to_search_config().validate()?;
        Ok(())
    }
}
