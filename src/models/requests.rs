use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{ClientNeeds, Criteria, WeightMap};

/// Request for a weighted attribute match
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct WeightedMatchRequest {
    #[validate(length(min = 1, message = "animalType is required"))]
    #[serde(rename = "animalType", default)]
    pub animal_type: String,
    #[serde(default)]
    pub attributes: Criteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightMap>,
}

impl WeightedMatchRequest {
    pub fn new(animal_type: impl Into<String>, attributes: Criteria) -> Self {
        Self {
            animal_type: animal_type.into(),
            attributes,
            weights: None,
        }
    }

    pub fn with_weights(mut self, weights: WeightMap) -> Self {
        self.weights = Some(weights);
        self
    }
}

/// Request for a service/therapy/search assignment match
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ServiceMatchRequest {
    #[validate(length(min = 1, message = "serviceType is required"))]
    #[serde(rename = "serviceType", default)]
    pub service_type: String,
    #[serde(rename = "clientNeeds", default)]
    pub client_needs: Option<ClientNeeds>,
}

impl ServiceMatchRequest {
    pub fn new(service_type: impl Into<String>, client_needs: ClientNeeds) -> Self {
        Self {
            service_type: service_type.into(),
            client_needs: Some(client_needs),
        }
    }
}

/// Criteria block nested inside a priority match request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityCriteria {
    #[serde(rename = "animalType", default)]
    pub animal_type: String,
    #[serde(default)]
    pub attributes: Criteria,
}

/// Request for an ordinal priority-queue match
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PriorityMatchRequest {
    #[serde(default)]
    pub criteria: Option<PriorityCriteria>,
    #[validate(length(min = 1, message = "priorityAttributes must name at least one attribute"))]
    #[serde(rename = "priorityAttributes", default)]
    pub priority_attributes: Vec<String>,
}

impl PriorityMatchRequest {
    pub fn new(
        animal_type: impl Into<String>,
        attributes: Criteria,
        priority_attributes: Vec<String>,
    ) -> Self {
        Self {
            criteria: Some(PriorityCriteria {
                animal_type: animal_type.into(),
                attributes,
            }),
            priority_attributes,
        }
    }
}

/// Optional `?limit=` query parameter shared by all match endpoints
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}
