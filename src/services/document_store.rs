use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use crate::models::{AnimalFilter, Candidate};
use crate::services::store::{AnimalStore, StoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST document store client
///
/// All rescue animals live in one collection, discriminated by `animalType`.
/// Handles:
/// - Querying candidate pools with equality filters
/// - Fetching a single animal by id
/// - Upserting animal records
pub struct DocumentStoreClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    collection: String,
    client: Client,
}

impl DocumentStoreClient {
    /// Create a new document store client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collection: String,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            collection,
            client,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collection
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), urlencoding::encode(id))
    }

    /// Build store query strings for a filter
    ///
    /// e.g. `equal("animalType", "Dog")`, `equal("reserved", false)`
    pub fn build_queries(filter: &AnimalFilter) -> Result<Vec<String>, StoreError> {
        let mut queries = vec![format!(
            "equal(\"animalType\", {})",
            serde_json::to_string(filter.animal_type.as_str())?
        )];

        for (name, value) in &filter.equals {
            queries.push(format!("equal(\"{}\", {})", name, serde_json::to_string(value)?));
        }

        Ok(queries)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Store-Key", &self.api_key)
            .header("X-Store-Project", &self.project_id)
    }

    async fn check_status(response: Response, action: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Document store rejected {}: {} - {}", action, status, body);
        Err(StoreError::Api(format!("Failed to {}: {}", action, status)))
    }
}

/// Unwrap the `data` envelope some stores put around document fields
fn document_body(doc: &Value) -> &Value {
    doc.get("data").unwrap_or(doc)
}

#[async_trait]
impl AnimalStore for DocumentStoreClient {
    async fn find(&self, filter: &AnimalFilter) -> Result<Vec<Candidate>, StoreError> {
        let queries = Self::build_queries(filter)?;
        let queries_json = serde_json::to_string(&queries)?;
        let url = format!("{}?query={}", self.documents_url(), urlencoding::encode(&queries_json));

        tracing::debug!("Querying {} pool: {:?}", filter.animal_type, queries);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check_status(response, "query candidates").await?;
        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| StoreError::InvalidResponse("Missing documents array".into()))?;

        let candidates: Vec<Candidate> = documents
            .iter()
            .filter_map(|doc| match Candidate::try_from(document_body(doc).clone()) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::warn!("Skipping unreadable animal document: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Queried {} candidates (total: {})", candidates.len(), total);

        Ok(candidates)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Candidate>, StoreError> {
        let response = self.authorized(self.client.get(self.document_url(id))).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check_status(response, "fetch animal").await?;
        let json: Value = response.json().await?;

        Candidate::try_from(document_body(&json).clone())
            .map(Some)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse animal {}: {}", id, e)))
    }

    async fn save(&self, candidate: Candidate) -> Result<Candidate, StoreError> {
        let payload = json!({ "data": serde_json::to_value(&candidate)? });

        let response = self
            .authorized(self.client.put(self.document_url(&candidate.id)))
            .json(&payload)
            .send()
            .await?;
        let response = Self::check_status(response, "save animal").await?;
        let json: Value = response.json().await?;

        let saved = Candidate::try_from(document_body(&json).clone())
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse saved animal: {}", e)))?;

        tracing::debug!("Saved {} {}", saved.animal_type, saved.id);

        Ok(saved)
    }
}
