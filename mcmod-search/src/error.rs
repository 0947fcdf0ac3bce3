//! Error types for the mcmod-search crate.
//!
//! Collection-level failures (fetch errors, timeouts, a missing results
//! container) are folded into an empty result set by the pipeline, so the
//! variants that escape [`crate::search`] are limited to configuration
//! problems and cancellation.

/// Errors that can occur while fetching or processing a search page.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The upstream fetch did not complete within the configured deadline.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// An HTTP request to the upstream search page failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The request was cancelled before the pipeline finished.
    #[error("search cancelled")]
    Cancelled,
}

/// Convenience type alias for mcmod-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Why a single result node could not be turned into a record.
///
/// These never abort a search; the node is logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A required child node was not found.
    #[error("missing node `{selector}` at index {index}")]
    MissingNode {
        /// CSS selector that was looked up.
        selector: &'static str,
        /// Zero-based match index that was requested.
        index: usize,
    },

    /// The address anchor had no usable `href`.
    #[error("result has no address")]
    MissingAddress,
}
