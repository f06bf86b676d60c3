// Core algorithm exports
pub mod attribute;
pub mod filters;
pub mod matcher;
pub mod priority;
pub mod service;
pub mod weighted;

pub use attribute::{score_attribute, Contribution};
pub use filters::{adoption_filter, is_adoptable, is_service_eligible, service_eligibility_filter};
pub use matcher::{resolve_animal_type, MatchOrchestrator};
pub use priority::{calculate_priority, find_matches_with_priority_queue, PriorityQueue, Prioritized};
pub use service::{
    assess_therapy_suitability, calculate_service_score, match_for_service, SuitabilityRecommendation,
    TherapySuitability,
};
pub use weighted::{calculate_weighted_score, find_best_matches, DEFAULT_LIMIT};
