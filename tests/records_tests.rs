use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crewdesk::backend::Collection;

#[macro_use]
mod common;

use common::TestBackend;

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data is a list")
        .iter()
        .map(|record| record["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let test = TestBackend::seeded().await;
    let app = test_app!(test.ctx);
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

#[actix_web::test]
async fn test_list_skips_malformed_records() {
    let (status, body) = get_json("/api/v1/tasks").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(ids(&body), vec!["t-1", "t-2", "t-3"]);
}

#[actix_web::test]
async fn test_overdue_filter_uses_deadline() {
    let (_, body) = get_json("/api/v1/tasks?status=overdue").await;
    assert_eq!(ids(&body), vec!["t-1", "t-3"]);
}

#[actix_web::test]
async fn test_invoice_status_filter_covers_payment() {
    let (_, body) = get_json("/api/v1/invoices?status=unpaid").await;
    assert_eq!(ids(&body), vec!["inv-pending", "inv-approved", "inv-approved-2"]);

    let (_, body) = get_json("/api/v1/invoices?status=approved").await;
    assert_eq!(ids(&body), vec!["inv-approved", "inv-approved-2"]);
}

#[actix_web::test]
async fn test_status_filter_ignores_spelling() {
    let (_, body) = get_json("/api/v1/tasks?status=In%20Progress").await;
    assert_eq!(ids(&body), vec!["t-1"]);
}

#[actix_web::test]
async fn test_search_covers_subtasks() {
    let (_, body) = get_json("/api/v1/tasks?search=PERMITS").await;
    assert_eq!(ids(&body), vec!["t-2"]);
}

#[actix_web::test]
async fn test_project_filter_matches_embedded_name() {
    let (_, body) = get_json("/api/v1/tasks?project=Harbor%20Depot").await;
    assert_eq!(ids(&body), vec!["t-1"]);
}

#[actix_web::test]
async fn test_combined_criteria_are_anded() {
    let (_, body) = get_json("/api/v1/tasks?project=p-2&status=completed").await;
    assert!(ids(&body).is_empty());
}

#[actix_web::test]
async fn test_blank_criteria_are_ignored() {
    let (_, body) = get_json("/api/v1/tasks?status=&search=&project=").await;
    assert_eq!(ids(&body).len(), 3);
}

#[actix_web::test]
async fn test_worker_filters() {
    let (_, body) = get_json("/api/v1/workers?specialization=Electrician").await;
    assert_eq!(ids(&body), vec!["w-1"]);

    let (_, body) = get_json("/api/v1/workers?specialization=s-2").await;
    assert_eq!(ids(&body), vec!["2"]);

    let (_, body) = get_json("/api/v1/workers?status=inactive").await;
    assert_eq!(ids(&body), vec!["2"]);
}

#[actix_web::test]
async fn test_work_records_date_range_is_inclusive() {
    let (_, body) = get_json("/api/v1/work-records?from=2024-05-02&to=2024-05-03").await;
    assert_eq!(ids(&body), vec!["wr-1", "wr-2"]);
}

#[actix_web::test]
async fn test_get_unknown_record_is_not_found() {
    let (status, body) = get_json("/api/v1/projects/p-404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[actix_web::test]
async fn test_create_update_delete_roundtrip() {
    let test = TestBackend::seeded().await;
    let app = test_app!(test.ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/specializations")
        .set_json(json!({ "name": "Plumber" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/specializations/{}", id))
        .set_json(json!({ "description": "Pipes and fixtures" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], json!("Plumber"));
    assert_eq!(body["data"]["description"], json!("Pipes and fixtures"));

    // The cached listing must reflect the write
    let req = test::TestRequest::get().uri("/api/v1/specializations").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![id.clone()]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/specializations/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test.backend.count(Collection::Specializations).await, 0);
}

#[actix_web::test]
async fn test_billed_work_record_is_locked() {
    let test = TestBackend::seeded().await;
    let app = test_app!(test.ctx);

    let req = test::TestRequest::put()
        .uri("/api/v1/work-records/wr-4")
        .set_json(json!({ "dailyRate": "999" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete()
        .uri("/api/v1/work-records/wr-4")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    assert_eq!(test.raw(Collection::WorkRecords, "wr-4").await["dailyRate"], json!(100));
}

#[actix_web::test]
async fn test_paid_invoice_cannot_be_deleted() {
    let test = TestBackend::seeded().await;
    let app = test_app!(test.ctx);

    let req = test::TestRequest::delete()
        .uri("/api/v1/invoices/inv-paid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(test.backend.count(Collection::Invoices).await, 4);
}

#[actix_web::test]
async fn test_responses_carry_correlation_id() {
    let test = TestBackend::seeded().await;
    let app = test_app!(test.ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/projects")
        .insert_header(("X-Correlation-ID", "req-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-correlation-id").unwrap(), "req-42");
}
