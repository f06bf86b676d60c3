use crate::core::weighted::{rank_by_score, round_score};
use crate::models::{attr, Candidate, ClientNeeds, MatchResult, ServiceType};

/// Score granted for passing the eligibility prefilter
pub const ELIGIBILITY_BASELINE: f64 = 70.0;

const MAX_SCORE: f64 = 100.0;
const OBEDIENCE_POINTS: f64 = 4.0;
const SPECIALIZATION_POINTS: f64 = 5.0;
const TEMPERAMENT_POINTS: f64 = 5.0;
const SUITABILITY_POINTS: f64 = 5.0;

/// Outcome of an equine therapy suitability assessment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TherapySuitability {
    /// Mean of the four factors, each on a 1-5 scale
    pub score: f64,
    pub recommendation: SuitabilityRecommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitabilityRecommendation {
    HighlySuitable,
    PotentiallySuitable,
    NotRecommended,
}

impl SuitabilityRecommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighlySuitable => "Highly Suitable for Therapy",
            Self::PotentiallySuitable => "Potentially Suitable",
            Self::NotRecommended => "Not Recommended for Therapy",
        }
    }
}

/// Assess a horse for therapy work
///
/// Averages temperament, ground manners, arena behavior and a riding-safety
/// factor (5 when safe, 1 otherwise). Returns `None` if any factor is missing.
pub fn assess_therapy_suitability(horse: &Candidate) -> Option<TherapySuitability> {
    let factors = [
        horse.number(attr::TEMPERAMENT)?,
        horse.number(attr::GROUND_MANNERS)?,
        horse.number(attr::ARENA_BEHAVIOR)?,
        if horse.flag(attr::RIDING_SAFE)? { 5.0 } else { 1.0 },
    ];

    let score = factors.iter().sum::<f64>() / factors.len() as f64;
    let recommendation = if score > 4.0 {
        SuitabilityRecommendation::HighlySuitable
    } else if score > 3.0 {
        SuitabilityRecommendation::PotentiallySuitable
    } else {
        SuitabilityRecommendation::NotRecommended
    };

    Some(TherapySuitability { score, recommendation })
}

/// Calculate a service match score for an already-eligible candidate
///
/// Starts from the eligibility baseline and adds service-specific bonuses.
/// An equine candidate whose rider weight limit is below the client's weight
/// scores exactly 0. The result is capped at 100.
pub fn calculate_service_score(candidate: &Candidate, service_type: ServiceType, needs: &ClientNeeds) -> f64 {
    let mut score = ELIGIBILITY_BASELINE;

    match service_type {
        ServiceType::Service => {
            if let Some(level) = candidate.number(attr::OBEDIENCE_LEVEL) {
                score += level * OBEDIENCE_POINTS;
            }
            if let (Some(wanted), Some(has)) = (&needs.specializations, candidate.list(attr::SPECIALIZATIONS)) {
                let shared = wanted
                    .iter()
                    .filter(|spec| has.iter().any(|v| v.as_text() == Some(spec.as_str())))
                    .count();
                score += shared as f64 * SPECIALIZATION_POINTS;
            }
        }
        ServiceType::Therapy => {
            if let Some(temperament) = candidate.number(attr::TEMPERAMENT) {
                score += temperament * TEMPERAMENT_POINTS;
            }
        }
        ServiceType::EquineTherapy => {
            if let Some(assessment) = assess_therapy_suitability(candidate) {
                score += assessment.score * SUITABILITY_POINTS;
            }
            if exceeds_rider_limit(candidate, needs) {
                return 0.0;
            }
        }
        ServiceType::Search => {}
    }

    round_score(score.min(MAX_SCORE))
}

fn exceeds_rider_limit(horse: &Candidate, needs: &ClientNeeds) -> bool {
    match (needs.rider_weight, horse.number(attr::MAX_RIDER_WEIGHT)) {
        (Some(rider), Some(limit)) => rider > limit,
        _ => false,
    }
}

/// Rank an eligible pool for a service assignment, best first
pub fn match_for_service(
    pool: &[Candidate],
    service_type: ServiceType,
    needs: &ClientNeeds,
    limit: usize,
) -> Vec<MatchResult> {
    let scored = pool
        .iter()
        .map(|candidate| (candidate, calculate_service_score(candidate, service_type, needs)))
        .collect();

    rank_by_score(scored, limit)
}
