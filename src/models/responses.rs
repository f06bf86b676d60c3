use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Envelope returned by all match endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub status: String,
    pub results: usize,
    pub data: Vec<MatchResult>,
}

impl MatchesResponse {
    pub fn success(data: Vec<MatchResult>) -> Self {
        Self {
            status: "success".to_string(),
            results: data.len(),
            data,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
