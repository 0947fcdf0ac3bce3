//! Final response payload assembled from a ranking.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::ranking::Ranking;
use crate::scoring::round_score;
use crate::types::{Record, ScoredRecord};

/// Timestamp layout used in responses, e.g. `2025-02-16 15:28:47`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A record with its score rounded to one decimal place.
///
/// Serialises as the record's own fields with `score` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultView {
    /// Relevance score, rounded to one decimal place.
    pub score: f64,
    /// The scored record.
    #[serde(flatten)]
    pub record: Record,
}

impl From<ScoredRecord<'_>> for ResultView {
    fn from(scored: ScoredRecord<'_>) -> Self {
        Self {
            score: round_score(scored.score),
            record: scored.record.clone(),
        }
    }
}

/// Successful search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Always `true`; failures use a separate error payload.
    pub success: bool,
    /// Trimmed search term as received.
    pub search_term: String,
    /// Local time the response was generated, see [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Number of records extracted from the page, before ranking.
    pub total_results: usize,
    /// Best match, serialised as `null` when nothing was found.
    pub best_result: Option<ResultView>,
    /// Ranked alternatives.
    pub other_results: Vec<ResultView>,
}

impl SearchResponse {
    /// Assemble a response stamped with the current local time.
    pub fn assemble(search_term: &str, total_results: usize, ranking: &Ranking<'_>) -> Self {
        Self::assemble_at(search_term, total_results, ranking, &Local::now())
    }

    /// Assemble a response stamped with `now`.
    pub fn assemble_at<Tz>(
        search_term: &str,
        total_results: usize,
        ranking: &Ranking<'_>,
        now: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            success: true,
            search_term: search_term.to_owned(),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            total_results,
            best_result: ranking.best.map(ResultView::from),
            other_results: ranking.others.iter().copied().map(ResultView::from).collect(),
        }
    }

    /// An empty response for `search_term`, used when nothing could be read
    /// from upstream.
    pub fn empty(search_term: &str) -> Self {
        Self::assemble(search_term, 0, &Ranking::default())
    }
}
