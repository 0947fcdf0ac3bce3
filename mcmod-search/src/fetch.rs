//! Fetching the upstream search page.
//!
//! [`PageFetcher`] is the seam between the pipeline and the network.
//! [`HttpFetcher`] is the production implementation on top of a shared
//! [`reqwest::Client`].

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Something that can retrieve raw markup for a URL.
///
/// Implementations must be `Send + Sync` so a single fetcher can be shared
/// by concurrent requests.
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the request fails or the server
    /// answers with an error status.
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<String, SearchError>> + Send;
}

/// [`PageFetcher`] backed by a reusable [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("upstream request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("upstream HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("upstream response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "upstream response received");
        Ok(html)
    }
}

/// Build a [`reqwest::Client`] configured for the upstream site.
///
/// The client has:
/// - Timeout from config
/// - The configured User-Agent
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
