//! Typed access to the remote REST backend that owns every record.

mod collection;
mod error;
pub mod http;
pub mod memory;

pub use collection::Collection;
pub use error::{BackendError, BackendResult};
pub use http::HttpBackend;
pub use memory::InMemoryBackend;

use async_trait::async_trait;
use serde_json::Value;

/// Request/response contract of the system of record.
///
/// Records travel as raw JSON; decoding into typed models happens in
/// `AppContext`, where malformed entries can be dropped one by one.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch(&self, collection: Collection) -> BackendResult<Vec<Value>>;

    async fn fetch_one(&self, collection: Collection, id: &str) -> BackendResult<Value>;

    async fn create(&self, collection: Collection, payload: &Value) -> BackendResult<Value>;

    async fn update(&self, collection: Collection, id: &str, payload: &Value)
    -> BackendResult<Value>;

    async fn delete(&self, collection: Collection, id: &str) -> BackendResult<()>;
}
