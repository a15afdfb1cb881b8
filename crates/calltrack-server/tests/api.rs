// tests/api.rs

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

use calltrack::{Call, CallRepository, SeedDocument};
use calltrack_server::adapters::InMemoryCallRepository;
use calltrack_server::models::{ApiResponse, CallResponse, DashboardResponse};
use calltrack_server::{build_router, AppState};

const SEED: &str = r#"{"calls":[
    {"id":"call_bob","prospectName":"Bob","company":"Globex","outcome":"qualified","duration":600,"sentimentScore":0.8},
    {"id":"call_carol","prospectName":"Carol","company":"Initech","outcome":"follow-up","duration":300}
]}"#;

fn seeded_calls() -> Vec<Call> {
    SeedDocument::parse(SEED).unwrap().calls
}

fn app_with(calls: Vec<Call>, api_key: Option<&str>) -> (Router, Arc<InMemoryCallRepository>) {
    let repo = Arc::new(InMemoryCallRepository::with_calls(calls));
    let state = AppState::new(repo.clone(), api_key.map(str::to_string));
    (build_router(state), repo)
}

fn app() -> (Router, Arc<InMemoryCallRepository>) {
    app_with(seeded_calls(), None)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn data<T: DeserializeOwned>(body: Value) -> T {
    let envelope: ApiResponse<T> = serde_json::from_value(body).unwrap();
    assert!(envelope.success);
    assert!(envelope.error.is_none());
    envelope.data
}

fn names(calls: &[CallResponse]) -> Vec<&str> {
    calls.iter().map(|c| c.prospect_name.as_str()).collect()
}

#[tokio::test]
async fn test_list_filter_and_delete_flow() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api/calls?status=qualified")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&data::<Vec<CallResponse>>(body)), ["Bob"]);

    let (status, body) = send(&app, get("/api/calls?search=bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&data::<Vec<CallResponse>>(body)), ["Bob"]);

    let (status, body) = send(&app, delete("/api/calls/call_carol")).await;
    assert_eq!(status, StatusCode::OK);
    let removed: CallResponse = data(body);
    assert_eq!(removed.prospect_name, "Carol");

    let (_, body) = send(&app, get("/api/calls")).await;
    assert_eq!(names(&data::<Vec<CallResponse>>(body)), ["Bob"]);
}

#[tokio::test]
async fn test_list_status_all_and_search_by_company() {
    let (app, _) = app();

    let (_, body) = send(&app, get("/api/calls?status=all")).await;
    assert_eq!(names(&data::<Vec<CallResponse>>(body)), ["Bob", "Carol"]);

    let (_, body) = send(&app, get("/api/calls?search=%20INITECH%20")).await;
    assert_eq!(names(&data::<Vec<CallResponse>>(body)), ["Carol"]);

    let (_, body) = send(&app, get("/api/calls?search=bob&status=follow-up")).await;
    assert!(data::<Vec<CallResponse>>(body).is_empty());
}

#[tokio::test]
async fn test_malformed_query_string_uses_envelope() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api/calls?search=a&search=b")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], json!([]));
    assert!(body["error"].is_string());

    let (status, body) = send(&app, get("/api/dashboard?status=a&status=b")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_create_minimal_call() {
    let (app, repo) = app();

    let (status, body) = send(
        &app,
        with_json(
            "POST",
            "/api/calls",
            json!({ "prospectName": "Acme", "outcome": "qualified" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let call: CallResponse = data(body);
    assert!(call.id.starts_with("call_"));
    assert_eq!(call.company, "");
    assert_eq!(call.notes, "");
    assert_eq!(call.duration, 0);
    assert_eq!(
        call.date,
        chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
    );

    // Newest call is listed first
    let (_, body) = send(&app, get("/api/calls")).await;
    assert_eq!(
        names(&data::<Vec<CallResponse>>(body)),
        ["Acme", "Bob", "Carol"]
    );
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_create_with_missing_fields_is_bad_request() {
    let (app, repo) = app();

    let (status, body) = send(
        &app,
        with_json("POST", "/api/calls", json!({ "company": "Nobody Inc" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(
        body["error"],
        "Missing required fields: prospectName, outcome"
    );
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_with_invalid_values_is_bad_request() {
    let (app, repo) = app();

    for payload in [
        json!({ "prospectName": "Acme", "outcome": "won" }),
        json!({ "prospectName": "Acme", "outcome": "qualified", "duration": -1 }),
        json!({ "prospectName": "Acme", "outcome": "qualified", "sentimentScore": 1.2 }),
        json!({ "prospectName": "Acme", "outcome": "qualified", "status": "done" }),
    ] {
        let (status, body) = send(&app, with_json("POST", "/api/calls", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_malformed_payload_is_internal_error() {
    let (app, repo) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/calls")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to create call"));
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_update_keeps_id_and_merges() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        with_json(
            "PUT",
            "/api/calls/call_bob",
            json!({ "id": "y", "notes": "hi", "tags": ["renewal", "renewal"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let call: CallResponse = data(body);
    assert_eq!(call.id, "call_bob");
    assert_eq!(call.notes, "hi");
    assert_eq!(call.tags, ["renewal"]);
    assert_eq!(call.company, "Globex");
    assert_eq!(call.outcome, "qualified");

    let (status, _) = send(&app, get("/api/calls/y")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, get("/api/calls/call_bob")).await;
    let fetched: CallResponse = data(body);
    assert_eq!(fetched, call);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (app, repo) = app();

    let requests = [
        get("/api/calls/missing"),
        with_json("PUT", "/api/calls/missing", json!({ "notes": "x" })),
        delete("/api/calls/missing"),
    ];

    for request in requests {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["error"], "Call not found");
    }
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_dashboard_respects_filters() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api/dashboard")).await;
    assert_eq!(status, StatusCode::OK);
    let stats: DashboardResponse = data(body);
    assert_eq!(stats.total_calls, 2);
    assert!((stats.avg_duration_minutes - 7.5).abs() < 1e-9);
    assert!((stats.qualified_rate - 50.0).abs() < 1e-9);
    assert!((stats.avg_sentiment - 0.8).abs() < 1e-9);
    assert_eq!(stats.outcomes.len(), 5);

    let (_, body) = send(&app, get("/api/dashboard?status=follow-up")).await;
    let stats: DashboardResponse = data(body);
    assert_eq!(stats.total_calls, 1);
    assert_eq!(stats.qualified_rate, 0.0);
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let (app, _) = app_with(seeded_calls(), Some("s3cret"));

    let (status, body) = send(&app, get("/api/calls")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let request = Request::builder()
        .uri("/api/calls")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/calls")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data::<Vec<CallResponse>>(body).len(), 2);

    // Health stays open
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/calls").is_some());
}
