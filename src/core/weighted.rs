use crate::core::attribute::{score_attribute, Contribution};
use crate::models::{Candidate, Criteria, MatchResult, WeightMap};

/// Weight applied when the caller supplies none for an attribute
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Number of results returned when the caller does not set a limit
pub const DEFAULT_LIMIT: usize = 5;

/// Look up an attribute's weight without touching the caller's map.
/// A zero weight is treated as unset.
#[inline]
pub fn weight_for(weights: &WeightMap, attribute: &str) -> f64 {
    weights
        .get(attribute)
        .copied()
        .filter(|w| *w != 0.0)
        .unwrap_or(DEFAULT_WEIGHT)
}

/// Calculate a weighted match score (0-100) for one candidate
///
/// score = sum(contribution) / sum(max_possible) * 100
///
/// Attributes the candidate lacks are left out of both sums. Individual
/// numeric contributions may be negative; the normalized total is held to
/// the 0-100 range and rounded to two decimals.
pub fn calculate_weighted_score(candidate: &Candidate, criteria: &Criteria, weights: &WeightMap) -> f64 {
    let totals = criteria
        .iter()
        .map(|(name, desired)| {
            score_attribute(candidate.attribute(name), desired, weight_for(weights, name))
        })
        .fold(Contribution::default(), |acc, c| Contribution {
            achieved: acc.achieved + c.achieved,
            max_possible: acc.max_possible + c.max_possible,
        });

    let normalized = if totals.max_possible > 0.0 {
        (totals.achieved / totals.max_possible) * 100.0
    } else {
        0.0
    };

    round_score(normalized.clamp(0.0, 100.0))
}

/// Rank a pool by weighted score, best first
pub fn find_best_matches(
    pool: &[Candidate],
    criteria: &Criteria,
    weights: &WeightMap,
    limit: usize,
) -> Vec<MatchResult> {
    let scored = pool
        .iter()
        .map(|candidate| (candidate, calculate_weighted_score(candidate, criteria, weights)))
        .collect();

    rank_by_score(scored, limit)
}

/// Stable descending sort, then truncate. Equal scores keep pool order.
pub(crate) fn rank_by_score(mut scored: Vec<(&Candidate, f64)>, limit: usize) -> Vec<MatchResult> {
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(candidate, match_score)| MatchResult {
            animal: candidate.clone(),
            match_score,
        })
        .collect()
}

/// Round half away from zero to two decimal places
#[inline]
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
