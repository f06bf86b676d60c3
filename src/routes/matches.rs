use actix_web::{web, HttpResponse, Responder};
use crate::config::MatchingSettings;
use crate::core::MatchOrchestrator;
use crate::error::MatchError;
use crate::models::{
    HealthResponse, LimitQuery, MatchesResponse, PriorityMatchRequest, ServiceMatchRequest,
    WeightedMatchRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: MatchOrchestrator,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/best", web::post().to(best_matches))
        .route("/matches/service", web::post().to(service_matches))
        .route("/matches/priority", web::post().to(priority_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Weighted attribute matches
///
/// POST /api/v1/matches/best?limit=5
///
/// Request body:
/// ```json
/// {
///   "animalType": "dog",
///   "attributes": { "temperament": 4, "goodWithKids": true },
///   "weights": { "temperament": 2 }
/// }
/// ```
async fn best_matches(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
    req: web::Json<WeightedMatchRequest>,
) -> Result<HttpResponse, MatchError> {
    let limit = state.matching.effective_limit(query.limit);
    let matches = state.orchestrator.find_best_matches(&req, limit).await?;

    Ok(HttpResponse::Ok().json(MatchesResponse::success(matches)))
}

/// Service assignment matches
///
/// POST /api/v1/matches/service?limit=5
///
/// Request body:
/// ```json
/// {
///   "serviceType": "EQUINE_THERAPY",
///   "clientNeeds": { "riderWeight": 180 }
/// }
/// ```
async fn service_matches(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
    req: web::Json<ServiceMatchRequest>,
) -> Result<HttpResponse, MatchError> {
    let limit = state.matching.effective_limit(query.limit);
    let matches = state.orchestrator.match_for_service(&req, limit).await?;

    Ok(HttpResponse::Ok().json(MatchesResponse::success(matches)))
}

/// Ordinal priority matches
///
/// POST /api/v1/matches/priority?limit=5
///
/// Request body:
/// ```json
/// {
///   "criteria": { "animalType": "dog", "attributes": { "obedienceLevel": 5 } },
///   "priorityAttributes": ["obedienceLevel", "specializations"]
/// }
/// ```
async fn priority_matches(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
    req: web::Json<PriorityMatchRequest>,
) -> Result<HttpResponse, MatchError> {
    let limit = state.matching.effective_limit(query.limit);
    let matches = state.orchestrator.find_matches_with_priority_queue(&req, limit).await?;

    Ok(HttpResponse::Ok().json(MatchesResponse::success(matches)))
}
