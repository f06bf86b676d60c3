// Service exports
pub mod cache;
pub mod document_store;
pub mod store;

pub use cache::{CacheKey, CacheStats, CachedStore};
pub use document_store::DocumentStoreClient;
pub use store::{AnimalStore, InMemoryStore, StoreError};
