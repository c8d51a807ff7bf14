use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use serde::Serialize;
use serde_json::Value;

use crate::backend::{Backend, Collection, HttpBackend, InMemoryBackend};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Record;

/// Application-wide state handed to every handler through `web::Data`.
///
/// Reads go through a short-lived per-collection cache; every write through
/// the context drops the cached copy of that collection, so the next read
/// sees the backend's answer (last write wins).
#[derive(Clone)]
pub struct AppContext {
    backend: Arc<dyn Backend>,
    cache: Cache<Collection, Arc<Vec<Value>>>,
}

impl AppContext {
    pub fn new(backend: Arc<dyn Backend>, cache_capacity: u64, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(cache_capacity)
            .time_to_live(cache_ttl)
            .build();
        Self { backend, cache }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn Backend> = if config.uses_memory_backend() {
            log::warn!("Using the in-memory backend; data is lost on restart");
            Arc::new(InMemoryBackend::new())
        } else {
            let http = HttpBackend::new(
                &config.backend_url,
                Duration::from_secs(config.backend_timeout_secs),
            )?
            .with_token(config.backend_token.clone());
            log::info!("Using backend at {}", http.base_url());
            Arc::new(http)
        };

        Ok(Self::new(
            backend,
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_secs),
        ))
    }

    async fn raw(&self, collection: Collection) -> AppResult<Arc<Vec<Value>>> {
        if let Some(cached) = self.cache.get(&collection).await {
            return Ok(cached);
        }
        let fetched = Arc::new(self.backend.fetch(collection).await?);
        self.cache.insert(collection, fetched.clone()).await;
        Ok(fetched)
    }

    pub async fn invalidate(&self, collection: Collection) {
        self.cache.invalidate(&collection).await;
    }

    /// Every decodable record of `T`'s collection. Entries that do not match
    /// the expected shape are logged and skipped.
    pub async fn list<T: Record>(&self) -> AppResult<Vec<T>> {
        let raw = self.raw(T::COLLECTION).await?;
        Ok(decode_all(T::COLLECTION, &raw))
    }

    pub async fn get<T: Record>(&self, id: &str) -> AppResult<T> {
        let raw = self.backend.fetch_one(T::COLLECTION, id).await?;
        decode_one(T::COLLECTION, raw)
    }

    pub async fn create<T: Record>(&self, payload: &Value) -> AppResult<T> {
        let result = self.backend.create(T::COLLECTION, payload).await;
        self.invalidate(T::COLLECTION).await;
        decode_one(T::COLLECTION, result?)
    }

    /// Create from any serializable payload type.
    pub async fn create_from<T: Record, P: Serialize>(&self, payload: &P) -> AppResult<T> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| AppError::internal_server_error_message(e.to_string()))?;
        self.create::<T>(&payload).await
    }

    pub async fn update<T: Record>(&self, id: &str, payload: &Value) -> AppResult<T> {
        let result = self.backend.update(T::COLLECTION, id, payload).await;
        self.invalidate(T::COLLECTION).await;
        decode_one(T::COLLECTION, result?)
    }

    /// Write back a whole record.
    pub async fn save<T: Record>(&self, record: &T) -> AppResult<T> {
        let payload = serde_json::to_value(record)
            .map_err(|e| AppError::internal_server_error_message(e.to_string()))?;
        self.update::<T>(record.id(), &payload).await
    }

    pub async fn delete<T: Record>(&self, id: &str) -> AppResult<()> {
        let result = self.backend.delete(T::COLLECTION, id).await;
        self.invalidate(T::COLLECTION).await;
        Ok(result?)
    }
}

fn decode_all<T: Record>(collection: Collection, raw: &[Value]) -> Vec<T> {
    raw.iter()
        .enumerate()
        .filter_map(|(position, value)| match T::deserialize(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!(
                    "Skipping malformed {} entry at position {}: {}",
                    collection,
                    position,
                    e
                );
                None
            }
        })
        .collect()
}

fn decode_one<T: Record>(collection: Collection, raw: Value) -> AppResult<T> {
    serde_json::from_value(raw).map_err(|e| {
        log::error!("Backend returned a malformed {} record: {}", collection, e);
        AppError::internal_server_error_message(format!(
            "Backend returned a malformed {} record",
            collection
        ))
    })
}
