//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls where the upstream search page lives, how long a
//! fetch may take, and which User-Agent is sent.

use crate::error::SearchError;

/// Default upstream search host.
pub const DEFAULT_BASE_URL: &str = "https://search.mcmod.cn";

/// User-Agent the upstream site sees unless overridden.
pub const DEFAULT_USER_AGENT: &str = "mcmod-api/1.0 (github.com/zkitefly/mcmod-api)";

/// Configuration for a search operation.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Scheme and host of the upstream search site. The search page is
    /// requested at `{base_url}/s?key=<term>`.
    pub base_url: String,
    /// Upper bound on the upstream fetch, in seconds.
    pub timeout_seconds: u64,
    /// User-Agent header sent upstream.
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_seconds: 8,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must be an absolute `http` or `https` URL
    /// - `timeout_seconds` must be greater than 0
    /// - `user_agent` must not be blank
    pub fn validate(&self) -> Result<(), SearchError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("base_url is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Config(
                "base_url must use http or https".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        Ok(())
    }

    /// Builds the upstream search-page URL for `term`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `base_url` cannot be parsed.
    pub fn search_url(&self, term: &str) -> Result<url::Url, SearchError> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = url::Url::parse(&format!("{base}/s"))
            .map_err(|e| SearchError::Config(format!("base_url is not a valid URL: {e}")))?;
        url.query_pairs_mut().append_pair("key", term);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, "https://search.mcmod.cn");
        assert_eq!(config.timeout_seconds, 8);
        assert!(config.user_agent.starts_with("mcmod-api/1.0"));
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn relative_base_url_rejected() {
        let config = SearchConfig {
            base_url: "search.mcmod.cn".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn non_http_scheme_rejected() {
        let config = SearchConfig {
            base_url: "ftp://search.mcmod.cn".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn blank_user_agent_rejected() {
        let config = SearchConfig {
            user_agent: "   ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("user_agent"));
    }

    #[test]
    fn search_url_encodes_term() {
        let config = SearchConfig::default();
        let url = config.search_url("工业 2").expect("valid url");
        assert_eq!(url.path(), "/s");
        let key = url
            .query_pairs()
            .find(|(k, _)| k == "key")
            .map(|(_, v)| v.into_owned());
        assert_eq!(key.as_deref(), Some("工业 2"));
    }

    #[test]
    fn search_url_tolerates_trailing_slash() {
        let config = SearchConfig {
            base_url: "http://127.0.0.1:9000/".into(),
            ..Default::default()
        };
        let url = config.search_url("IC2").expect("valid url");
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/s?key=IC2");
    }
}
