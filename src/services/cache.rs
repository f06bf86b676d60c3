use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use crate::models::{AnimalFilter, Candidate};
use crate::services::store::{AnimalStore, StoreError};

/// Candidate pool cache in front of an entity store
///
/// `find` results are cached per filter for a fixed TTL. Any `save` clears
/// every cached pool.
pub struct CachedStore<S> {
    inner: S,
    pools: moka::future::Cache<String, Arc<Vec<Candidate>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: AnimalStore> CachedStore<S> {
    pub fn new(inner: S, capacity: u64, ttl_secs: u64) -> Self {
        let pools = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            inner,
            pools,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Drop every cached pool
    pub async fn invalidate_all(&self) {
        self.pools.invalidate_all();
        self.pools.run_pending_tasks().await;
        tracing::debug!("Invalidated all cached pools");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheStats {
            entries: self.pools.entry_count(),
            hit_count: hits,
            miss_count: misses,
            hit_rate: if lookups > 0 { hits as f64 / lookups as f64 } else { 0.0 },
        }
    }
}

#[async_trait]
impl<S: AnimalStore> AnimalStore for CachedStore<S> {
    async fn find(&self, filter: &AnimalFilter) -> Result<Vec<Candidate>, StoreError> {
        let key = CacheKey::pool(filter);

        if let Some(pool) = self.pools.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Pool cache hit: {}", key);
            return Ok(pool.as_ref().clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("Pool cache miss: {}", key);

        let pool = self.inner.find(filter).await?;
        self.pools.insert(key, Arc::new(pool.clone())).await;
        Ok(pool)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Candidate>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, candidate: Candidate) -> Result<Candidate, StoreError> {
        let saved = self.inner.save(candidate).await?;
        self.invalidate_all().await;
        Ok(saved)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a candidate pool
    ///
    /// Filter conditions are kept in a sorted map, so equal filters always
    /// produce the same key.
    pub fn pool(filter: &AnimalFilter) -> String {
        let conditions = filter
            .equals
            .iter()
            .map(|(name, value)| {
                let value = serde_json::to_string(value).unwrap_or_default();
                format!("{}={}", name, value)
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("pool:{}:{}", filter.animal_type, conditions)
    }
}
