//! rescue-match - candidate matching and ranking for a rescue animal backend
//!
//! Scores pools of rescue animals against adopter or client criteria using
//! three strategies: weighted attribute scoring, service eligibility scoring,
//! and ordinal priority ranking.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::MatchOrchestrator;
pub use error::MatchError;
pub use models::{
    AnimalType, AttributeValue, Candidate, ClientNeeds, Criteria, MatchResult, PriorityMatchRequest,
    ServiceMatchRequest, ServiceType, WeightMap, WeightedMatchRequest,
};
pub use services::{AnimalStore, InMemoryStore};
