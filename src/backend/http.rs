use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::{Backend, BackendError, BackendResult, Collection};

/// Error body the backend sends with 400/422 responses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, FieldMessages>,
}

/// Field errors come either as a single message or as a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldMessages {
    One(String),
    Many(Vec<String>),
}

impl From<FieldMessages> for Vec<String> {
    fn from(messages: FieldMessages) -> Self {
        match messages {
            FieldMessages::One(message) => vec![message],
            FieldMessages::Many(messages) => messages,
        }
    }
}

/// REST client for the system of record
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    fn record_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection.path(), id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> BackendResult<Value> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(map_failure(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let body: Value = serde_json::from_str(&text)?;
        Ok(unwrap_envelope(body))
    }
}

/// Accept both bare payloads and `{ "data": ... }` envelopes.
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn map_failure(status: StatusCode, text: &str) -> BackendError {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    let message = body
        .message
        .clone()
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => BackendError::Validation {
            message,
            fields: body
                .errors
                .into_iter()
                .map(|(field, messages)| (field, messages.into()))
                .collect(),
        },
        StatusCode::NOT_FOUND => BackendError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Unauthorized(message),
        _ => BackendError::Upstream {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch(&self, collection: Collection) -> BackendResult<Vec<Value>> {
        let url = self.collection_url(collection);
        log::debug!("GET {}", url);
        match self.send(self.client.get(&url)).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(BackendError::InvalidResponse(format!(
                "expected a list of {}, got {}",
                collection,
                kind_of(&other)
            ))),
        }
    }

    async fn fetch_one(&self, collection: Collection, id: &str) -> BackendResult<Value> {
        let url = self.record_url(collection, id);
        log::debug!("GET {}", url);
        match self.send(self.client.get(&url)).await? {
            Value::Null => Err(BackendError::NotFound(format!("{} {}", collection, id))),
            record => Ok(record),
        }
    }

    async fn create(&self, collection: Collection, payload: &Value) -> BackendResult<Value> {
        let url = self.collection_url(collection);
        log::debug!("POST {}", url);
        self.send(self.client.post(&url).json(payload)).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        payload: &Value,
    ) -> BackendResult<Value> {
        let url = self.record_url(collection, id);
        log::debug!("PUT {}", url);
        self.send(self.client.put(&url).json(payload)).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> BackendResult<()> {
        let url = self.record_url(collection, id);
        log::debug!("DELETE {}", url);
        self.send(self.client.delete(&url)).await.map(|_| ())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
