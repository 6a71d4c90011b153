//! HTTP surface: envelopes and status codes through the real router
//! Run: cargo test -p booking-server --test consultation_api

use axum::Router;
use axum::body::Body;
use booking_server::api::build_app;
use booking_server::db::DbService;
use booking_server::{Config, DatabaseConfig, ServerState};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let database = DatabaseConfig::in_memory();
    let db = DbService::new(&database).await.unwrap();
    let config = Config::with_overrides(database, 0);
    build_app(ServerState::with_db(config, db))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create(app: &Router, body: Value) -> String {
    let (status, json) = send(app, "POST", "/api/consultations", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_returns_201_envelope() {
    let app = app().await;
    let (status, json) = send(
        &app,
        "POST",
        "/api/consultations",
        Some(json!({
            "customerId": "C1",
            "eventType": "wedding",
            "budgetRange": "5000-10000",
            "preferredDateStart": "2026-06-20"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Consultation created");
    assert_eq!(json["error"], json!({}));
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["customerId"], "C1");
    assert_eq!(json["data"]["preferredDateStart"], "2026-06-20");
}

#[tokio::test]
async fn test_validation_failures_are_400_envelopes() {
    let app = app().await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/consultations",
        Some(json!({ "eventType": "wedding" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["kind"], "validation");
    assert_eq!(json["error"]["details"]["field"], "customerId");
    assert_eq!(json["data"], Value::Null);

    // malformed body still gets the envelope
    let request = Request::builder()
        .method("POST")
        .uri("/api/consultations")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], 6);

    let (status, json) = send(&app, "GET", "/api/consultations?status=archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], 4002);

    let (status, json) = send(&app, "GET", "/api/consultations?dateFrom=June", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["details"]["field"], "dateFrom");
}

#[tokio::test]
async fn test_unknown_consultation_is_404() {
    let app = app().await;
    let (status, json) = send(&app, "GET", "/api/consultations/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Consultation missing not found");
    assert_eq!(json["error"]["code"], 4001);
    assert_eq!(json["error"]["kind"], "not_found");

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/consultations/missing/status",
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lifecycle_over_http() {
    let app = app().await;
    let id = create(&app, json!({ "customerId": "C1", "eventType": "wedding" })).await;

    let (status, json) = send(
        &app,
        "PATCH",
        &format!("/api/consultations/{id}/assign"),
        Some(json!({ "specialistId": "S1", "specialistName": "Jane" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Specialist assigned");
    assert_eq!(json["data"]["assignedSpecialistName"], "Jane");

    let (status, json) = send(
        &app,
        "PATCH",
        &format!("/api/consultations/{id}/status"),
        Some(json!({ "status": "bogus" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], 4002);

    let (status, json) = send(
        &app,
        "PATCH",
        &format!("/api/consultations/{id}/status"),
        Some(json!({ "status": "completed", "notes": "done" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["notes"], "done");

    let (_, json) = send(&app, "GET", "/api/consultations/customer/C1", None).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (_, json) = send(&app, "GET", "/api/consultations?status=completed&assignedSpecialistId=S1", None).await;
    assert_eq!(json["data"][0]["id"], id.as_str());
}

#[tokio::test]
async fn test_stats_route_is_not_an_id() {
    let app = app().await;
    create(&app, json!({ "customerId": "C1", "eventType": "wedding" })).await;

    let (status, json) = send(&app, "GET", "/api/consultations/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["byStatus"]["pending"], 1);
    assert_eq!(json["data"]["byStatus"]["cancelled"], 0);
    assert_eq!(json["data"]["byEventType"]["wedding"], 1);
    assert_eq!(json["data"]["unassigned"], 1);
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let app = app().await;
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "healthy");

    let (status, json) = send(&app, "GET", "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["checks"]["database"]["status"], "ok");

    let (status, json) = send(&app, "GET", "/api/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = app().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(id.len(), 36);
}
