//! Search pipeline: fetch, parse, extract, rank, assemble.
//!
//! A request runs as one sequential pipeline with no shared state. The
//! upstream fetch is the only step that can stall, so it is bounded by
//! [`SearchConfig::timeout_seconds`] and raced against the request's
//! cancellation token. Extraction checks the token between result nodes.
//!
//! Anything that goes wrong while reading the upstream page (network
//! failure, timeout, error status, missing results container) yields an
//! empty result set rather than an error: an unavailable upstream is not a
//! client-facing failure.

use std::time::Duration;

use scraper::Html;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::dom::result_nodes;
use crate::error::SearchError;
use crate::extract::extract_record;
use crate::fetch::PageFetcher;
use crate::ranking::rank;
use crate::response::SearchResponse;
use crate::types::Record;

/// Everything a single search needs to know about the request it serves.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Trimmed, non-empty search term.
    pub term: String,
    /// Cancelled when the caller no longer wants the result.
    pub cancel: CancellationToken,
}

impl SearchRequest {
    /// A request for `term` with a fresh, never-cancelled token.
    pub fn new(term: impl Into<String>) -> Self {
        Self::with_cancel(term, CancellationToken::new())
    }

    /// A request for `term` that stops when `cancel` fires.
    pub fn with_cancel(term: impl Into<String>, cancel: CancellationToken) -> Self {
        Self {
            term: term.into(),
            cancel,
        }
    }
}

/// Run the full pipeline for `request`.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration and
/// [`SearchError::Cancelled`] if the request is cancelled. Upstream
/// failures produce an empty response instead.
pub async fn run_search<F: PageFetcher>(
    request: &SearchRequest,
    config: &SearchConfig,
    fetcher: &F,
) -> Result<SearchResponse, SearchError> {
    config.validate()?;

    let records = fetch_records(request, config, fetcher).await?;
    if request.cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    let ranking = rank(&records);
    Ok(SearchResponse::assemble(
        &request.term,
        records.len(),
        &ranking,
    ))
}

/// Fetch the upstream page for `request` and extract its records.
///
/// # Errors
///
/// Returns [`SearchError::Cancelled`] if the request is cancelled, or
/// [`SearchError::Config`] if no URL can be built from the configuration.
pub async fn fetch_records<F: PageFetcher>(
    request: &SearchRequest,
    config: &SearchConfig,
    fetcher: &F,
) -> Result<Vec<Record>, SearchError> {
    let url = config.search_url(&request.term)?;
    tracing::trace!(query = %request.term, "mcmod search");

    let deadline = Duration::from_secs(config.timeout_seconds);
    let outcome = tokio::select! {
        _ = request.cancel.cancelled() => return Err(SearchError::Cancelled),
        outcome = tokio::time::timeout(deadline, fetcher.fetch(url.as_str())) => outcome,
    };

    let html = match outcome {
        Ok(Ok(html)) => html,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "upstream fetch failed");
            return Ok(Vec::new());
        }
        Err(_) => {
            let err = SearchError::Timeout(format!("exceeded {}s limit", config.timeout_seconds));
            tracing::warn!(error = %err, "upstream fetch failed");
            return Ok(Vec::new());
        }
    };

    parse_records(&html, &request.cancel)
}

/// Extract every well-formed record from a search page, in page order.
///
/// Nodes that fail extraction are logged and skipped. A page without the
/// results container yields no records.
///
/// # Errors
///
/// Returns [`SearchError::Cancelled`] if `cancel` fires mid-extraction.
pub fn parse_records(html: &str, cancel: &CancellationToken) -> Result<Vec<Record>, SearchError> {
    let document = Html::parse_document(html);
    let Some(nodes) = result_nodes(&document) else {
        tracing::warn!("search results container not found");
        return Ok(Vec::new());
    };

    let mut records = Vec::with_capacity(nodes.len());
    for (position, node) in nodes.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        match extract_record(node) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!(position, error = %err, "skipping malformed result"),
        }
    }

    tracing::debug!(
        count = records.len(),
        skipped = nodes.len() - records.len(),
        "results extracted"
    );
    Ok(records)
}
