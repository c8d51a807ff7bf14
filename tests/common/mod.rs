#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use fake::Fake;
use fake::faker::name::en::Name;
use serde_json::{Value, json};

use crewdesk::AppContext;
use crewdesk::backend::{Backend, BackendError, BackendResult, Collection, InMemoryBackend};

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Full router over the given context, wrapped like the real server.
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.clone())
                .wrap(crewdesk::middleware::RequestIdMiddleware)
                .configure(crewdesk::routes::configure),
        )
        .await
    };
}

/// In-memory backend that answers 500 to updates of the listed records.
pub struct FailingUpdates {
    inner: Arc<InMemoryBackend>,
    failing: Vec<(Collection, String)>,
}

impl FailingUpdates {
    fn fails(&self, collection: Collection, id: &str) -> bool {
        self.failing
            .iter()
            .any(|(c, failing_id)| *c == collection && failing_id == id)
    }
}

#[async_trait]
impl Backend for FailingUpdates {
    async fn fetch(&self, collection: Collection) -> BackendResult<Vec<Value>> {
        self.inner.fetch(collection).await
    }

    async fn fetch_one(&self, collection: Collection, id: &str) -> BackendResult<Value> {
        self.inner.fetch_one(collection, id).await
    }

    async fn create(&self, collection: Collection, payload: &Value) -> BackendResult<Value> {
        self.inner.create(collection, payload).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        payload: &Value,
    ) -> BackendResult<Value> {
        if self.fails(collection, id) {
            return Err(BackendError::Upstream {
                status: 500,
                message: format!("{} {} is unavailable", collection, id),
            });
        }
        self.inner.update(collection, id, payload).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> BackendResult<()> {
        self.inner.delete(collection, id).await
    }
}

// Test backend wrapper
pub struct TestBackend {
    pub backend: Arc<InMemoryBackend>,
    pub ctx: web::Data<AppContext>,
}

impl TestBackend {
    fn over(backend: Arc<InMemoryBackend>, serving: Arc<dyn Backend>) -> Self {
        setup_test_env();
        let ctx = web::Data::new(AppContext::new(serving, 16, Duration::from_secs(60)));
        Self { backend, ctx }
    }

    pub async fn empty() -> Self {
        let backend = Arc::new(InMemoryBackend::new());
        Self::over(backend.clone(), backend)
    }

    pub async fn seeded() -> Self {
        let test = Self::empty().await;
        test.seed().await;
        test
    }

    /// Seeded data behind a backend that rejects updates to `failing` records.
    pub async fn seeded_with_failing_updates(failing: &[(Collection, &str)]) -> Self {
        let backend = Arc::new(InMemoryBackend::new());
        let serving = Arc::new(FailingUpdates {
            inner: backend.clone(),
            failing: failing
                .iter()
                .map(|(collection, id)| (*collection, id.to_string()))
                .collect(),
        });
        let test = Self::over(backend, serving);
        test.seed().await;
        test
    }

    async fn seed(&self) {
        self.backend.seed(Collection::Workers, MockData::workers()).await;
        self.backend.seed(Collection::Projects, MockData::projects()).await;
        self.backend.seed(Collection::Tasks, MockData::tasks()).await;
        self.backend
            .seed(Collection::WorkRecords, MockData::work_records())
            .await;
        self.backend.seed(Collection::Invoices, MockData::invoices()).await;
    }

    pub async fn raw(&self, collection: Collection, id: &str) -> Value {
        self.backend
            .fetch_one(collection, id)
            .await
            .expect("record exists")
    }
}

// Mock data generators. Shapes vary on purpose: some references are bare ids,
// some embedded objects, some numbers arrive as strings.
pub struct MockData;

impl MockData {
    pub fn worker_name() -> String {
        Name().fake()
    }

    pub fn workers() -> Vec<Value> {
        vec![
            json!({
                "id": "w-1",
                "name": "Dana Reyes",
                "status": "active",
                "specialization": { "_id": "s-1", "name": "Electrician" },
                "dailyRate": "100",
                "overtimeRate": 10
            }),
            json!({
                "_id": 2,
                "name": Self::worker_name(),
                "status": "Inactive",
                "specializationId": "s-2"
            }),
            json!({ "id": "w-3", "name": Self::worker_name() }),
        ]
    }

    pub fn projects() -> Vec<Value> {
        vec![
            json!({ "id": "p-1", "name": "Harbor Depot", "status": "active", "startDate": "2024-03-01" }),
            json!({ "id": "p-2", "title": "Mill Street Lofts", "status": "on hold" }),
            json!({ "id": "p-3", "name": "Riverside School", "status": "completed" }),
        ]
    }

    pub fn tasks() -> Vec<Value> {
        vec![
            json!({
                "id": "t-1",
                "title": "Frame north wall",
                "status": "in_progress",
                "projectId": { "id": "p-1", "name": "Harbor Depot" },
                "assignedWorkers": ["w-1"],
                "deadline": "2001-01-01"
            }),
            json!({
                "id": "t-2",
                "name": "Rough-in wiring",
                "status": "pending",
                "project": "p-2",
                "subtasks": [{ "name": "Pull permits", "completed": false }],
                "deadline": "2999-12-31T00:00:00Z"
            }),
            json!({ "id": "t-3", "name": "Site cleanup", "status": "completed", "deadline": "2001-01-01" }),
            // Unknown status, skipped at decode time
            json!({ "id": "t-4", "name": "Mystery", "status": "exploded" }),
        ]
    }

    pub fn work_records() -> Vec<Value> {
        vec![
            json!({
                "id": "wr-1",
                "workerId": "w-1",
                "projectId": "p-1",
                "date": "2024-05-02",
                "regularHours": 8,
                "overtimeHours": "3",
                "dailyRate": "100",
                "overtimeRate": "10"
            }),
            json!({
                "id": "wr-2",
                "workerId": { "id": "w-1", "name": "Dana Reyes" },
                "projectId": "p-1",
                "date": "2024-05-03",
                "dailyRate": 100,
                "manualAdjustment": "-10"
            }),
            json!({
                "id": "wr-3",
                "workerId": "w-1",
                "projectId": "p-2",
                "date": "2024-06-10",
                "dailyRate": 100
            }),
            json!({
                "id": "wr-4",
                "workerId": "w-1",
                "date": "2024-04-01",
                "dailyRate": 100,
                "invoiceId": "inv-paid"
            }),
        ]
    }

    pub fn invoices() -> Vec<Value> {
        vec![
            Self::invoice("inv-pending", "pending", "unpaid", "150"),
            Self::invoice("inv-approved", "approved", "unpaid", "200"),
            Self::invoice("inv-approved-2", "approved", "unpaid", "50.50"),
            Self::invoice("inv-paid", "paid", "paid", "100"),
        ]
    }

    pub fn invoice(id: &str, approval: &str, payment: &str, final_amount: &str) -> Value {
        json!({
            "id": id,
            "workerId": { "id": "w-1", "name": "Dana Reyes" },
            "projectId": "p-1",
            "date": "2024-05-31",
            "amount": {
                "daily": final_amount,
                "extraHours": "0",
                "calculated": final_amount,
                "adjust": "0",
                "final": final_amount
            },
            "approvalStatus": approval,
            "paymentStatus": payment
        })
    }
}

/// Numbers may come back as JSON strings or numbers.
pub fn decimal(value: &Value) -> BigDecimal {
    match value {
        Value::String(text) => BigDecimal::from_str(text).expect("decimal string"),
        Value::Number(number) => BigDecimal::from_str(&number.to_string()).expect("decimal number"),
        other => panic!("not a decimal: {}", other),
    }
}

pub fn dec(text: &str) -> BigDecimal {
    BigDecimal::from_str(text).expect("decimal literal")
}
