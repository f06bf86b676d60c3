use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use crate::models::{AnimalFilter, Candidate};

/// Errors that can occur when reading from or writing to the entity store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("Unauthorized: invalid API key or project")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Entity store holding the rescue animal records
///
/// The matching core only reads pools through `find`; `find_by_id` and
/// `save` are the remaining collaborator operations used by intake tooling
/// and tests.
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Return every animal matching the filter, in store order
    async fn find(&self, filter: &AnimalFilter) -> Result<Vec<Candidate>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Candidate>, StoreError>;

    /// Insert or replace an animal by id
    async fn save(&self, candidate: Candidate) -> Result<Candidate, StoreError>;
}

/// Process-local store; keeps insertion order
#[derive(Debug, Default)]
pub struct InMemoryStore {
    animals: RwLock<Vec<Candidate>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animals(animals: Vec<Candidate>) -> Self {
        Self {
            animals: RwLock::new(animals),
        }
    }

    pub async fn len(&self) -> usize {
        self.animals.read().await.len()
    }
}

#[async_trait]
impl AnimalStore for InMemoryStore {
    async fn find(&self, filter: &AnimalFilter) -> Result<Vec<Candidate>, StoreError> {
        let animals = self.animals.read().await;
        Ok(animals.iter().filter(|a| filter.matches(a)).cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Candidate>, StoreError> {
        let animals = self.animals.read().await;
        Ok(animals.iter().find(|a| a.id == id).cloned())
    }

    async fn save(&self, candidate: Candidate) -> Result<Candidate, StoreError> {
        let mut animals = self.animals.write().await;
        match animals.iter_mut().find(|a| a.id == candidate.id) {
            Some(existing) => *existing = candidate.clone(),
            None => animals.push(candidate.clone()),
        }
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{attr, AnimalType};

    #[tokio::test]
    async fn test_find_applies_filter_in_order() {
        let store = InMemoryStore::with_animals(vec![
            Candidate::new("1", AnimalType::Dog).with(attr::ADOPTABLE, true),
            Candidate::new("2", AnimalType::Horse).with(attr::ADOPTABLE, true),
            Candidate::new("3", AnimalType::Dog).with(attr::ADOPTABLE, false),
            Candidate::new("4", AnimalType::Dog).with(attr::ADOPTABLE, true),
        ]);

        let filter = AnimalFilter::new(AnimalType::Dog).with(attr::ADOPTABLE, true);
        let ids: Vec<String> = store.find(&filter).await.unwrap().into_iter().map(|c| c.id).collect();

        assert_eq!(ids, vec!["1", "4"]);
    }

    #[tokio::test]
    async fn test_save_upserts_in_place() {
        let store = InMemoryStore::new();
        store.save(Candidate::new("1", AnimalType::Dog).with("temperament", 2)).await.unwrap();
        store.save(Candidate::new("2", AnimalType::Dog)).await.unwrap();
        store.save(Candidate::new("1", AnimalType::Dog).with("temperament", 4)).await.unwrap();

        assert_eq!(store.len().await, 2);
        let updated = store.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(updated.number("temperament"), Some(4.0));

        let all = store.find(&AnimalFilter::new(AnimalType::Dog)).await.unwrap();
        assert_eq!(all[0].id, "1");
        assert!(store.find_by_id("missing").await.unwrap().is_none());
    }
}
