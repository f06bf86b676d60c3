use std::sync::Arc;
use validator::Validate;
use crate::core::{
    filters::{adoption_filter, service_eligibility_filter},
    priority, service, weighted,
};
use crate::error::MatchError;
use crate::models::{
    AnimalFilter, AnimalType, Candidate, ClientNeeds, MatchResult, PriorityMatchRequest,
    ServiceMatchRequest, ServiceType, WeightMap, WeightedMatchRequest,
};
use crate::services::AnimalStore;

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Request validation and token resolution
/// 2. Eligibility prefilter, pushed to the store and re-applied locally
/// 3. Engine scoring and ranking
///
/// Validation always runs before the store is touched.
#[derive(Clone)]
pub struct MatchOrchestrator {
    store: Arc<dyn AnimalStore>,
}

impl MatchOrchestrator {
    pub fn new(store: Arc<dyn AnimalStore>) -> Self {
        Self { store }
    }

    /// Weighted attribute match over the adoptable pool of one animal type
    pub async fn find_best_matches(
        &self,
        request: &WeightedMatchRequest,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        request.validate()?;
        if request.attributes.is_empty() {
            return Err(MatchError::invalid("attributes must name at least one criterion"));
        }
        let weights = match &request.weights {
            Some(weights) => {
                check_weights(weights)?;
                weights.clone()
            }
            None => WeightMap::new(),
        };
        let animal_type = resolve_animal_type(&request.animal_type)?;

        let pool = self
            .load_pool(adoption_filter(animal_type), "Failed to find animal matches")
            .await?;
        let matches = weighted::find_best_matches(&pool, &request.attributes, &weights, limit);

        tracing::info!(
            "Weighted match for {}: {} candidates, {} returned",
            animal_type,
            pool.len(),
            matches.len()
        );

        Ok(matches)
    }

    /// Service, therapy, or search assignment match over the eligible pool
    pub async fn match_for_service(
        &self,
        request: &ServiceMatchRequest,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        request.validate()?;
        let needs: &ClientNeeds = request
            .client_needs
            .as_ref()
            .ok_or_else(|| MatchError::invalid("clientNeeds is required"))?;
        let service_type: ServiceType = request.service_type.parse()?;

        let pool = self
            .load_pool(
                service_eligibility_filter(service_type),
                "Failed to find service animal matches",
            )
            .await?;
        let matches = service::match_for_service(&pool, service_type, needs, limit);

        tracing::info!(
            "Service match for {}: {} eligible, {} returned",
            service_type,
            pool.len(),
            matches.len()
        );

        Ok(matches)
    }

    /// Ordinal priority match over the adoptable pool of one animal type
    pub async fn find_matches_with_priority_queue(
        &self,
        request: &PriorityMatchRequest,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        request.validate()?;
        let criteria = request
            .criteria
            .as_ref()
            .ok_or_else(|| MatchError::invalid("criteria is required"))?;
        if criteria.animal_type.trim().is_empty() {
            return Err(MatchError::invalid("animalType is required"));
        }
        if criteria.attributes.is_empty() {
            return Err(MatchError::invalid("attributes must name at least one criterion"));
        }
        if request.priority_attributes.iter().any(|name| name.trim().is_empty()) {
            return Err(MatchError::invalid("priorityAttributes must not contain blank names"));
        }
        let animal_type = resolve_animal_type(&criteria.animal_type)?;

        let pool = self
            .load_pool(adoption_filter(animal_type), "Failed to find priority matches")
            .await?;
        let matches = priority::find_matches_with_priority_queue(
            &pool,
            &criteria.attributes,
            &request.priority_attributes,
            limit,
        );

        tracing::info!(
            "Priority match for {} over {:?}: {} candidates, {} returned",
            animal_type,
            request.priority_attributes,
            pool.len(),
            matches.len()
        );

        Ok(matches)
    }

    /// Fetch a pool and drop anything the filter rejects
    ///
    /// Store failures are logged in full and surfaced with `failure` only.
    async fn load_pool(
        &self,
        filter: AnimalFilter,
        failure: &'static str,
    ) -> Result<Vec<Candidate>, MatchError> {
        let mut pool = self.store.find(&filter).await.map_err(|e| {
            tracing::error!("{} ({} pool): {}", failure, filter.animal_type, e);
            MatchError::Internal(failure)
        })?;

        pool.retain(|candidate| filter.matches(candidate));
        Ok(pool)
    }
}

/// Resolve a caller's animal type token, ignoring case
pub fn resolve_animal_type(token: &str) -> Result<AnimalType, MatchError> {
    Ok(token.parse::<AnimalType>()?)
}

fn check_weights(weights: &WeightMap) -> Result<(), MatchError> {
    match weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
        Some((name, weight)) => Err(MatchError::invalid(format!(
            "weight for {} must be a non-negative number, got {}",
            name, weight
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{attr, Criteria};
    use crate::services::InMemoryStore;

    fn adoptable(id: &str, animal_type: AnimalType) -> Candidate {
        Candidate::new(id, animal_type)
            .with(attr::ADOPTABLE, true)
            .with(attr::RESERVED, false)
    }

    fn orchestrator(animals: Vec<Candidate>) -> MatchOrchestrator {
        MatchOrchestrator::new(Arc::new(InMemoryStore::with_animals(animals)))
    }

    fn temperament_criteria() -> Criteria {
        Criteria::from([(attr::TEMPERAMENT.to_string(), 4.into())])
    }

    #[tokio::test]
    async fn test_weighted_match_uses_adoptable_pool() {
        let matcher = orchestrator(vec![
            adoptable("calm", AnimalType::Dog).with(attr::TEMPERAMENT, 4),
            adoptable("lively", AnimalType::Dog).with(attr::TEMPERAMENT, 1),
            adoptable("horse", AnimalType::Horse).with(attr::TEMPERAMENT, 4),
            adoptable("held", AnimalType::Dog)
                .with(attr::RESERVED, true)
                .with(attr::TEMPERAMENT, 4),
        ]);

        let request = WeightedMatchRequest::new("DOG", temperament_criteria());
        let matches = matcher.find_best_matches(&request, 5).await.unwrap();

        let ids: Vec<&str> = matches.iter().map(|m| m.animal.id.as_str()).collect();
        assert_eq!(ids, vec!["calm", "lively"]);
        assert_eq!(matches[0].match_score, 100.0);
        assert_eq!(matches[1].match_score, 70.0);
    }

    #[tokio::test]
    async fn test_unknown_animal_type_rejected() {
        let matcher = orchestrator(vec![]);
        let request = WeightedMatchRequest::new("dragon", temperament_criteria());

        let err = matcher.find_best_matches(&request, 5).await.unwrap_err();
        assert!(matches!(err, MatchError::InvalidRequest(ref m) if m == "invalid animal type: dragon"));
    }

    #[tokio::test]
    async fn test_empty_attributes_rejected() {
        let matcher = orchestrator(vec![adoptable("1", AnimalType::Dog)]);
        let request = WeightedMatchRequest::new("dog", Criteria::new());

        assert!(matches!(
            matcher.find_best_matches(&request, 5).await,
            Err(MatchError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_negative_weight_rejected() {
        let matcher = orchestrator(vec![]);
        let request = WeightedMatchRequest::new("dog", temperament_criteria())
            .with_weights(WeightMap::from([(attr::TEMPERAMENT.to_string(), -2.0)]));

        assert!(matches!(
            matcher.find_best_matches(&request, 5).await,
            Err(MatchError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_service_match_requires_client_needs() {
        let matcher = orchestrator(vec![]);
        let request = ServiceMatchRequest {
            service_type: "THERAPY".to_string(),
            client_needs: None,
        };

        let err = matcher.match_for_service(&request, 5).await.unwrap_err();
        assert!(matches!(err, MatchError::InvalidRequest(ref m) if m == "clientNeeds is required"));
    }

    #[tokio::test]
    async fn test_service_match_scores_therapy_dogs() {
        let therapy_dog = |id: &str, temperament: i32| {
            Candidate::new(id, AnimalType::Dog)
                .with(attr::ADOPTABLE, false)
                .with(attr::RESERVED, false)
                .with(attr::TRAINING_STATUS, "Ready")
                .with(attr::SERVICE_TYPE, "THERAPY")
                .with(attr::TEMPERAMENT, temperament)
        };
        let matcher = orchestrator(vec![
            therapy_dog("steady", 3),
            therapy_dog("gentle", 5),
            adoptable("pet", AnimalType::Dog).with(attr::TEMPERAMENT, 5),
        ]);

        let request = ServiceMatchRequest::new("therapy", ClientNeeds::default());
        let matches = matcher.match_for_service(&request, 5).await.unwrap();

        let ranked: Vec<(&str, f64)> = matches.iter().map(|m| (m.animal.id.as_str(), m.match_score)).collect();
        assert_eq!(ranked, vec![("gentle", 95.0), ("steady", 85.0)]);
    }

    #[tokio::test]
    async fn test_priority_match_rejects_blank_attribute_names() {
        let matcher = orchestrator(vec![]);
        let request = PriorityMatchRequest::new(
            "dog",
            temperament_criteria(),
            vec![attr::TEMPERAMENT.to_string(), "  ".to_string()],
        );

        assert!(matches!(
            matcher.find_matches_with_priority_queue(&request, 5).await,
            Err(MatchError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_priority_match_requires_attributes() {
        let matcher = orchestrator(vec![adoptable("1", AnimalType::Dog).with(attr::TEMPERAMENT, 4)]);
        let request: PriorityMatchRequest = serde_json::from_value(serde_json::json!({
            "criteria": { "animalType": "dog" },
            "priorityAttributes": ["temperament"]
        }))
        .unwrap();

        let err = matcher.find_matches_with_priority_queue(&request, 5).await.unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidRequest(ref m) if m == "attributes must name at least one criterion"
        ));

        let empty = PriorityMatchRequest::new("dog", Criteria::new(), vec![attr::TEMPERAMENT.to_string()]);
        assert!(matches!(
            matcher.find_matches_with_priority_queue(&empty, 5).await,
            Err(MatchError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_priority_match_returns_ordinal_scores() {
        let matcher = orchestrator(vec![
            adoptable("far", AnimalType::Bird).with(attr::TEMPERAMENT, 1),
            adoptable("near", AnimalType::Bird).with(attr::TEMPERAMENT, 5),
        ]);
        let request = PriorityMatchRequest::new("bird", temperament_criteria(), vec![attr::TEMPERAMENT.to_string()]);

        let matches = matcher.find_matches_with_priority_queue(&request, 5).await.unwrap();
        let ranked: Vec<(&str, f64)> = matches.iter().map(|m| (m.animal.id.as_str(), m.match_score)).collect();
        assert_eq!(ranked, vec![("near", 1.0), ("far", 0.0)]);
    }

    #[test]
    fn test_check_weights() {
        assert!(check_weights(&WeightMap::from([("a".to_string(), 0.0), ("b".to_string(), 3.5)])).is_ok());
        assert!(check_weights(&WeightMap::from([("a".to_string(), f64::NAN)])).is_err());
        assert!(check_weights(&WeightMap::from([("a".to_string(), f64::INFINITY)])).is_err());
    }
}
