//! Best-match selection and ordering of the alternatives.
//!
//! The best record is found with a single linear scan, so among records
//! sharing the top score the earliest one on the page wins. Every record at
//! the best record's address is then removed, and what remains is sorted by
//! score with a stable sort: equal scores keep their page order.

use crate::scoring::score;
use crate::types::{Record, ScoredRecord};

/// Maximum number of alternatives returned next to the best record.
pub const MAX_OTHER_RESULTS: usize = 4;

/// Outcome of ranking one page of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking<'a> {
    /// Highest-scoring record, if there were any records.
    pub best: Option<ScoredRecord<'a>>,
    /// Up to [`MAX_OTHER_RESULTS`] alternatives, highest score first.
    pub others: Vec<ScoredRecord<'a>>,
}

impl Ranking<'_> {
    /// Score of the best record, or `0.0` when there is none.
    pub fn best_score(&self) -> f64 {
        self.best.map_or(0.0, |best| best.score)
    }
}

/// Rank `records`, given in page order.
pub fn rank(records: &[Record]) -> Ranking<'_> {
    let scored: Vec<ScoredRecord<'_>> = records
        .iter()
        .map(|record| ScoredRecord {
            record,
            score: score(record),
        })
        .collect();

    let Some(best) = select_best(&scored) else {
        return Ranking::default();
    };

    let mut others: Vec<ScoredRecord<'_>> = scored
        .into_iter()
        .filter(|candidate| candidate.record.address != best.record.address)
        .collect();

    others.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    others.truncate(MAX_OTHER_RESULTS);

    tracing::debug!(
        total = records.len(),
        best_score = best.score,
        others = others.len(),
        "records ranked"
    );

    Ranking {
        best: Some(best),
        others,
    }
}

/// First record attaining the maximum score.
fn select_best<'a>(scored: &[ScoredRecord<'a>]) -> Option<ScoredRecord<'a>> {
    let mut iter = scored.iter().copied();
    let mut best = iter.next()?;
    for candidate in iter {
        if candidate.score > best.score {
            best = candidate;
        }
    }
    Some(best)
}
