use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Backend, BackendError, BackendResult, Collection};

/// Process-local backend used for local development (`BACKEND_URL=memory://`)
/// and tests. Records keep whatever shape they were seeded with.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, collection: Collection, records: Vec<Value>) {
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .extend(records);
    }

    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

fn record_id(record: &Value) -> Option<String> {
    let id = record.get("id").or_else(|| record.get("_id"))?;
    match id {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn not_found(collection: Collection, id: &str) -> BackendError {
    BackendError::NotFound(format!("{} {} does not exist", collection, id))
}

fn require_object(payload: &Value) -> BackendResult<serde_json::Map<String, Value>> {
    match payload {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(BackendError::Validation {
            message: "Payload must be a JSON object".to_string(),
            fields: Default::default(),
        }),
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn fetch(&self, collection: Collection) -> BackendResult<Vec<Value>> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_one(&self, collection: Collection, id: &str) -> BackendResult<Value> {
        self.collections
            .read()
            .await
            .get(&collection)
            .and_then(|records| {
                records
                    .iter()
                    .find(|r| record_id(r).as_deref() == Some(id))
                    .cloned()
            })
            .ok_or_else(|| not_found(collection, id))
    }

    async fn create(&self, collection: Collection, payload: &Value) -> BackendResult<Value> {
        let mut record = require_object(payload)?;
        if record_id(payload).is_none() {
            record.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        let record = Value::Object(record);

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        payload: &Value,
    ) -> BackendResult<Value> {
        let changes = require_object(payload)?;
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(&collection)
            .and_then(|records| {
                records
                    .iter_mut()
                    .find(|r| record_id(r).as_deref() == Some(id))
            })
            .ok_or_else(|| not_found(collection, id))?;

        if let Value::Object(fields) = &mut *existing {
            for (key, value) in changes {
                // The id is fixed by the path
                if key != "id" && key != "_id" {
                    fields.insert(key, value);
                }
            }
        }
        Ok(existing.clone())
    }

    async fn delete(&self, collection: Collection, id: &str) -> BackendResult<()> {
        let mut collections = self.collections.write().await;
        let records = collections
            .get_mut(&collection)
            .ok_or_else(|| not_found(collection, id))?;
        let before = records.len();
        records.retain(|r| record_id(r).as_deref() != Some(id));
        if records.len() == before {
            return Err(not_found(collection, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_assigns_an_id_and_update_merges() {
        let backend = InMemoryBackend::new();
        let created = backend
            .create(Collection::Workers, &json!({ "name": "Ana" }))
            .await
            .unwrap();
        let id = record_id(&created).unwrap();

        let updated = backend
            .update(
                Collection::Workers,
                &id,
                &json!({ "id": "other", "phone": "555-0100" }),
            )
            .await
            .unwrap();

        assert_eq!(updated["id"], json!(id));
        assert_eq!(updated["name"], json!("Ana"));
        assert_eq!(updated["phone"], json!("555-0100"));
    }

    #[tokio::test]
    async fn numeric_ids_are_addressable() {
        let backend = InMemoryBackend::new();
        backend
            .seed(Collection::Projects, vec![json!({ "_id": 12, "name": "Depot" })])
            .await;

        let found = backend.fetch_one(Collection::Projects, "12").await.unwrap();
        assert_eq!(found["name"], json!("Depot"));

        backend.delete(Collection::Projects, "12").await.unwrap();
        assert!(matches!(
            backend.delete(Collection::Projects, "12").await,
            Err(BackendError::NotFound(_))
        ));
    }
}
