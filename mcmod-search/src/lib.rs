//! # mcmod-search
//!
//! Search-result extraction and ranking for the MC百科 (mcmod.cn) search page.
//!
//! Given a search term, this crate fetches the upstream results page, turns
//! each result entry into a typed [`Record`], scores every record with a
//! fixed weighted heuristic, and picks a best match plus up to four ranked
//! alternatives.
//!
//! ## Design
//!
//! - Parses the results page with CSS selectors ([`scraper`])
//! - Malformed entries are logged and skipped, never fatal
//! - An unreachable or unexpected upstream page yields an empty result set
//! - The upstream fetch is bounded by a timeout and observes a per-request
//!   [`CancellationToken`](tokio_util::sync::CancellationToken)
//! - No caching and no state shared between requests
//!
//! ## Security
//!
//! - Search terms are logged only at trace level

pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod ranking;
pub mod response;
pub mod scoring;
pub mod types;

pub use config::SearchConfig;
pub use error::{ExtractError, Result, SearchError};
pub use fetch::{HttpFetcher, PageFetcher};
pub use pipeline::SearchRequest;
pub use ranking::{Ranking, MAX_OTHER_RESULTS};
pub use response::{ResultView, SearchResponse};
pub use types::{ModMetadata, Record, ScoredRecord};

/// Search mcmod.cn for `term` and rank the results.
///
/// Builds an [`HttpFetcher`] from `config` and runs the full pipeline. For
/// repeated searches, build the fetcher once and call
/// [`pipeline::run_search`] directly.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid and
/// [`SearchError::Http`] if the HTTP client cannot be built. Upstream
/// failures do not produce errors; they yield an empty response.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> mcmod_search::Result<()> {
/// let config = mcmod_search::SearchConfig::default();
/// let response = mcmod_search::search("IC2", &config).await?;
/// if let Some(best) = &response.best_result {
///     println!("{} ({})", best.record.title, best.score);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(term: &str, config: &SearchConfig) -> Result<SearchResponse> {
    config.validate()?;
    let fetcher = HttpFetcher::new(config)?;
    pipeline::run_search(&SearchRequest::new(term), config, &fetcher).await
}

/// Search with the default configuration.
///
/// Convenience wrapper around [`search`] using [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(term: &str) -> Result<SearchResponse> {
    search(term, &SearchConfig::default()).await
}
