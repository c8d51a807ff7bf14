use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::StatusCode, test, web};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crewdesk::AppContext;
use crewdesk::backend::{Backend, BackendError, Collection, HttpBackend};

#[macro_use]
mod common;

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_accepts_bare_and_enveloped_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "w-1", "name": "Ana" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/work-records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "id": "wr-1" }] })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert_eq!(backend.fetch(Collection::Workers).await.unwrap().len(), 1);
    assert_eq!(
        backend.fetch(Collection::WorkRecords).await.unwrap(),
        vec![json!({ "id": "wr-1" })]
    );
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({ "name": "Depot" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": 7, "name": "Depot" } })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server).with_token(Some("secret".to_string()));
    let created = backend
        .create(Collection::Projects, &json!({ "name": "Depot" }))
        .await
        .unwrap();
    assert_eq!(created["id"], json!(7));
}

#[tokio::test]
async fn test_validation_failure_keeps_field_errors() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/workers/w-1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Invalid worker",
            "errors": { "email": "is taken", "name": ["is required", "is too short"] }
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .update(Collection::Workers, "w-1", &json!({}))
        .await
        .unwrap_err();
    match err {
        BackendError::Validation { message, fields } => {
            assert_eq!(message, "Invalid worker");
            assert_eq!(fields["email"], vec!["is taken".to_string()]);
            assert_eq!(fields["name"].len(), 2);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/t-1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "forbidden" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert!(matches!(
        backend.fetch_one(Collection::Tasks, "missing").await,
        Err(BackendError::NotFound(_))
    ));
    assert!(matches!(
        backend.delete(Collection::Tasks, "t-1").await,
        Err(BackendError::Unauthorized(_))
    ));
    assert!(matches!(
        backend.fetch(Collection::Tasks).await,
        Err(BackendError::Upstream { status: 503, .. })
    ));
}

#[actix_web::test]
async fn test_upstream_failure_is_bad_gateway() {
    common::setup_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ctx = web::Data::new(AppContext::new(
        Arc::new(backend_for(&server)),
        16,
        Duration::from_secs(60),
    ));
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/invoices").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
}

#[actix_web::test]
async fn test_backend_validation_reaches_client_with_fields() {
    common::setup_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workers"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid worker",
            "errors": { "email": ["is taken"] }
        })))
        .mount(&server)
        .await;

    let ctx = web::Data::new(AppContext::new(
        Arc::new(backend_for(&server)),
        16,
        Duration::from_secs(60),
    ));
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/workers")
        .set_json(json!({ "email": "dup@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Invalid worker"));
    assert_eq!(body["data"]["email"], json!(["is taken"]));
}
