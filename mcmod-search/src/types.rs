//! Core types for extracted search results.

use serde::{Deserialize, Serialize};

/// Category code the upstream site uses for the mod page itself.
pub const CATEGORY_MOD: &str = "1";

/// Structured identity data parsed from a result's address and title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModMetadata {
    /// Numeric page id taken from `/class/<id>.html` or `/modpack/<id>.html`.
    pub mcmod_id: Option<String>,
    /// Abbreviation from a leading `[ABBR] ` title prefix.
    pub abbr: Option<String>,
    /// Primary (usually Chinese) name.
    pub chinese_name: String,
    /// Parenthesised secondary name, usually the English name.
    pub sub_name: Option<String>,
    /// Upstream classification code. Not present in search markup; carried
    /// through when a record is built from richer data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A single search result extracted from the upstream page.
///
/// Records are immutable once extracted; scoring works on borrowed views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Canonical page URL. Never empty.
    pub address: String,
    /// Title text exactly as shown on the results page (trimmed).
    pub title: String,
    /// Summary text, possibly empty.
    pub description: String,
    /// Freshness label of the upstream snapshot, e.g. `2025-02-12`.
    pub snapshot_time: String,
    /// Identity data derived from the address and title.
    #[serde(rename = "data")]
    pub metadata: ModMetadata,
}

/// A record paired with its relevance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord<'a> {
    /// The scored record.
    pub record: &'a Record,
    /// Unrounded relevance score.
    pub score: f64,
}
