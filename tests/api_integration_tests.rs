//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use ttl_refresh_cache::{api::create_router, cache::FixedJitter, AppState, RecordCache};

// == Helper Functions ==

fn create_test_app() -> Router {
    let state = AppState::new(RecordCache::new(FixedJitter(0.8)));
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn put_record(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/records")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == Upsert Endpoint Tests ==

#[tokio::test]
async fn test_upsert_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(put_record(r#"{"name":"a.test","record_type":"A","ttl":600}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("a.test"));
    assert_eq!(json["record"]["ttl"], 600);
    assert_eq!(json["record"]["record_type"], "A");
}

#[tokio::test]
async fn test_upsert_endpoint_negative_ttl() {
    let app = create_test_app();

    let response = app
        .oneshot(put_record(r#"{"name":"a.test","record_type":"A","ttl":-5}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid TTL"));
}

#[tokio::test]
async fn test_upsert_endpoint_empty_name() {
    let app = create_test_app();

    let response = app
        .oneshot(put_record(r#"{"name":"","record_type":"A","ttl":60}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Lookup Endpoint Tests ==

#[tokio::test]
async fn test_lookup_endpoint_success() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(put_record(r#"{"name":"a.test","record_type":"aaaa","ttl":600}"#))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    // Record types are matched case-insensitively
    let response = app.oneshot(get("/records/a.test/AAAA")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "a.test");
    assert_eq!(json["record_type"], "AAAA");
    assert!(json.get("expires_at").is_some());
}

#[tokio::test]
async fn test_lookup_endpoint_expired() {
    let app = create_test_app();

    app.clone()
        .oneshot(put_record(r#"{"name":"zero.test","record_type":"A","ttl":0}"#))
        .await
        .unwrap();

    let response = app.oneshot(get("/records/zero.test/A")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("expired"));
}

#[tokio::test]
async fn test_lookup_endpoint_not_found() {
    let app = create_test_app();

    let response = app.oneshot(get("/records/missing.test/A")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Delete Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app();

    app.clone()
        .oneshot(put_record(r#"{"name":"a.test","record_type":"MX","ttl":60}"#))
        .await
        .unwrap();

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/records/a.test/MX")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/records/a.test/MX")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Batch, Snapshot and Sweep Tests ==

#[tokio::test]
async fn test_batch_then_snapshot() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/records/batch")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"records":[
                        {"name":"late.test","record_type":"A","ttl":1800},
                        {"name":"bad.test","record_type":"A","ttl":-1},
                        {"name":"early.test","record_type":"AAAA","ttl":30}
                    ]}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["accepted"].as_array().unwrap().len(), 2);
    assert_eq!(json["rejected"].as_array().unwrap().len(), 1);
    assert_eq!(json["rejected"][0]["update"]["name"], "bad.test");

    let response = app.oneshot(get("/records")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["records"][0]["name"], "early.test");
    assert_eq!(json["records"][1]["name"], "late.test");
}

#[tokio::test]
async fn test_batch_rejects_blank_name_and_empty_type() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/records/batch")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"records":[
                        {"name":"x.test","record_type":"","ttl":60},
                        {"name":"   ","record_type":"A","ttl":60},
                        {"name":"ok.test","record_type":"A","ttl":60}
                    ]}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["accepted"].as_array().unwrap().len(), 1);
    assert_eq!(json["rejected"].as_array().unwrap().len(), 2);

    let response = app.oneshot(get("/records")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["records"][0]["name"], "ok.test");
}

#[tokio::test]
async fn test_sweep_endpoint_evicts_and_updates_stats() {
    let app = create_test_app();

    app.clone()
        .oneshot(put_record(r#"{"name":"zero.test","record_type":"A","ttl":0}"#))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sweep")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["evicted"][0]["name"], "zero.test");
    let kinds: Vec<&str> = json["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["refreshed", "evicted"]);

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["sweeps"], 1);
    assert_eq!(json["evicted"], 1);
    assert_eq!(json["total_records"], 0);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
