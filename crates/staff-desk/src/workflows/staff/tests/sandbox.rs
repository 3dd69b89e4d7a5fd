use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::staff::api::{sandbox_router, ApiError, SandboxBackend, SandboxError};
use crate::workflows::staff::domain::StaffId;
use crate::workflows::staff::form::{FormError, LoginPassword};

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn create_body(code: &str) -> Value {
    let mut payload = complete_payload(code);
    payload.login_password = LoginPassword::new("Welcome#1");
    serde_json::to_value(payload).expect("payload serializes")
}

#[test]
fn sandbox_assigns_sequential_ids_and_stores_passwords() {
    let backend = SandboxBackend::new();
    let mut payload = complete_payload("EMP-1");
    payload.login_password = LoginPassword::new("first-pass");
    let first = backend.create(&payload).expect("create");

    payload.employee_code = "EMP-2".to_string();
    let second = backend.create(&payload).expect("create");

    assert_eq!(first.id, StaffId(1));
    assert_eq!(second.id, StaffId(2));
    assert!(backend.password_matches(StaffId(1), "first-pass"));
    assert!(first.created_at.is_some());
}

#[test]
fn sandbox_update_keeps_password_when_blank_and_rejects_duplicates() {
    let backend = SandboxBackend::new();
    for code in ["EMP-1", "EMP-2"] {
        let mut payload = complete_payload(code);
        payload.login_password = LoginPassword::new("pw");
        backend.create(&payload).expect("create");
    }

    let mut edit = complete_payload("EMP-1");
    edit.designation = "Director".to_string();
    let updated = backend.update(StaffId(1), &edit).expect("update");
    assert_eq!(updated.designation.as_deref(), Some("Director"));
    assert!(backend.password_matches(StaffId(1), "pw"));

    let clash = complete_payload("emp-2");
    assert_eq!(
        backend.update(StaffId(1), &clash),
        Err(SandboxError::DuplicateEmployeeCode("emp-2".to_string()))
    );
    assert_eq!(
        backend.update(StaffId(9), &complete_payload("EMP-9")),
        Err(SandboxError::NotFound(StaffId(9)))
    );
}

#[test]
fn sandbox_errors_map_to_api_errors() {
    let missing = ApiError::from(SandboxError::Invalid(FormError::PasswordRequired));
    assert!(missing.is_validation());
    assert_eq!(missing.message(), "Login password is required for new staff");

    let absent = ApiError::from(SandboxError::NotFound(StaffId(3)));
    assert!(!absent.is_validation());
}

#[tokio::test]
async fn health_route_reports_ok() {
    let router = sandbox_router(Arc::new(SandboxBackend::new()));
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_route_returns_created_record() {
    let backend = Arc::new(SandboxBackend::new());
    let router = sandbox_router(Arc::clone(&backend));

    let response = router
        .oneshot(json_request("POST", "/api/company/staff", &create_body("EMP-77")))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["employee_code"], json!("EMP-77"));
    assert!(body.get("login_password").is_none());
    assert_eq!(backend.staff().len(), 1);
}

#[tokio::test]
async fn create_route_rejects_missing_password_with_unprocessable() {
    let router = sandbox_router(Arc::new(SandboxBackend::new()));
    let payload = serde_json::to_value(complete_payload("EMP-78")).expect("serializes");

    let response = router
        .oneshot(json_request("POST", "/api/company/staff", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Login password is required for new staff" })
    );
}

#[tokio::test]
async fn duplicate_code_returns_conflict() {
    let backend = Arc::new(SandboxBackend::new());
    let mut payload = complete_payload("EMP-80");
    payload.login_password = LoginPassword::new("pw");
    backend.create(&payload).expect("seed");

    let response = sandbox_router(backend)
        .oneshot(json_request("POST", "/api/company/staff", &create_body("EMP-80")))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_route_returns_not_found_for_unknown_staff() {
    let router = sandbox_router(Arc::new(SandboxBackend::new()));
    let payload = serde_json::to_value(complete_payload("EMP-81")).expect("serializes");

    let response = router
        .oneshot(json_request("PUT", "/api/company/staff/44", &payload))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn vacancy_route_lists_seeded_vacancies() {
    let backend = Arc::new(SandboxBackend::with_vacancies(vec![
        vacancy(10, "Backend Engineer", 82.6, Some(1)),
        vacancy(11, "Recruiter", 70.0, None),
    ]));

    let response = sandbox_router(backend)
        .oneshot(
            Request::get("/api/company/vacancies")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["match_threshold"], json!(82.6));
    assert_eq!(rows[1]["created_by_staff_id"], Value::Null);
}
