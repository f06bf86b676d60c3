// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    attr, AnimalFilter, AnimalType, AttributeValue, Candidate, CandidateParseError, ClientNeeds,
    Criteria, MatchResult, ServiceType, UnknownToken, WeightMap,
};
pub use requests::{LimitQuery, PriorityCriteria, PriorityMatchRequest, ServiceMatchRequest, WeightedMatchRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse};
