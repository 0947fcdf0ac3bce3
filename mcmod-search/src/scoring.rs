//! Weighted relevance scoring for extracted records.
//!
//! Every feature is a presence/shape gate with a fixed weight:
//!
//! | Feature                                    | Weight |
//! |--------------------------------------------|--------|
//! | page id present                            | +50 and `(10000 - id) / 100` |
//! | title present and not starting with `(`    | +30    |
//! | description longer than 100 characters     | +20    |
//! | primary name present                       | +15    |
//! | category is the mod itself (`"1"`)         | +40    |
//!
//! Lower page ids belong to older, better-known mods, so the id term
//! favours them. It goes negative above id 10000 and is not clamped.

use crate::types::{Record, CATEGORY_MOD};

const MCMOD_ID_WEIGHT: f64 = 50.0;
const TITLE_WEIGHT: f64 = 30.0;
const DESCRIPTION_WEIGHT: f64 = 20.0;
const CHINESE_NAME_WEIGHT: f64 = 15.0;
const CATEGORY_WEIGHT: f64 = 40.0;

/// Descriptions must be strictly longer than this many characters to count.
const MIN_DESCRIPTION_CHARS: usize = 100;

/// Pivot for the page-id bonus.
const ID_PIVOT: f64 = 10_000.0;

/// Sum of all presence weights.
pub const MAX_FEATURE_SCORE: f64 =
    MCMOD_ID_WEIGHT + TITLE_WEIGHT + DESCRIPTION_WEIGHT + CHINESE_NAME_WEIGHT + CATEGORY_WEIGHT;

/// Calculate the relevance score of a record.
///
/// Pure and deterministic: records that agree on every scored field get
/// the same score. An id that does not parse as an integer keeps the +50
/// presence weight but gets no id bonus. An id of `"0"` counts as present,
/// unlike the upstream PHP `empty()` check; real page ids start at 1.
pub fn score(record: &Record) -> f64 {
    let meta = &record.metadata;
    let mut total = 0.0;

    if let Some(id) = meta.mcmod_id.as_deref().filter(|id| !id.is_empty()) {
        total += MCMOD_ID_WEIGHT;
        if let Ok(id) = id.parse::<i64>() {
            total += (ID_PIVOT - id as f64) / 100.0;
        }
    }

    if !record.title.is_empty() && !record.title.starts_with('(') {
        total += TITLE_WEIGHT;
    }

    if record.description.chars().count() > MIN_DESCRIPTION_CHARS {
        total += DESCRIPTION_WEIGHT;
    }

    if !meta.chinese_name.is_empty() {
        total += CHINESE_NAME_WEIGHT;
    }

    if meta.category.as_deref() == Some(CATEGORY_MOD) {
        total += CATEGORY_WEIGHT;
    }

    total
}

/// Round a score to one decimal place, halves away from zero.
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
