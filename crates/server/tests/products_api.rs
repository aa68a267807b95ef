//! End-to-end tests for the `/products` API, driving the router in-process.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use store::{BackendConfig, DocumentStore, StoreConfig};
use server::{build_router, ServerConfig, ServerState};
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a fresh on-disk store. The temp dir must outlive the router.
fn test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = ServerConfig {
        db_path: dir.path().join("db.json"),
        ..ServerConfig::default()
    };
    let state = ServerState::new(config).expect("Failed to create test state");
    (build_router(Arc::new(state)), dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("JSON body")
}

#[tokio::test]
async fn product_lifecycle() {
    let (app, _dir) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({"name": "Iphone 11", "category": "Mobile", "price": "2000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created = json_body(&body);
    let id = created["id"].as_str().expect("id assigned").to_string();
    assert_eq!(id.len(), 8);
    assert_eq!(
        created,
        json!({"id": id, "name": "Iphone 11", "category": "Mobile", "price": "2000"})
    );
    // id is serialized first
    assert!(String::from_utf8(body).unwrap().starts_with("{\"id\":"));

    let (status, body) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), created);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/products/{id}"),
        Some(json!({"price": "1800"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({"id": id, "name": "Iphone 11", "category": "Mobile", "price": "1800"})
    );

    let (status, body) = send(&app, Method::DELETE, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, body) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn list_returns_products_in_creation_order() {
    let (app, _dir) = test_app();

    let (status, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([]));

    let mut ids = Vec::new();
    for name in ["a", "b", "c"] {
        let (_, body) = send(&app, Method::POST, "/products", Some(json!({ "name": name }))).await;
        ids.push(json_body(&body)["id"].clone());
    }

    let (_, body) = send(&app, Method::GET, "/products", None).await;
    let listed: Vec<Value> = json_body(&body)
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].clone())
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn unknown_ids_are_not_404() {
    let (app, _dir) = test_app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/products/nope", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    let (status, body) = send(&app, Method::PUT, "/products/nope", Some(json!({"price": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn extra_fields_pass_through_and_client_id_is_ignored() {
    let (app, _dir) = test_app();

    let (_, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({"id": "mine", "name": "Pixel", "price": 799, "specs": {"ram": 8}})),
    )
    .await;
    let created = json_body(&body);

    assert_ne!(created["id"], "mine");
    assert_eq!(created["price"], 799);
    assert_eq!(created["specs"], json!({"ram": 8}));
}

#[tokio::test]
async fn malformed_body_is_a_server_error() {
    let (app, _dir) = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(json_body(&bytes)["error"]["code"], "INVALID_BODY");

    let (_, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn responses_carry_cors_and_request_id_headers() {
    let (app, _dir) = test_app();

    let request = Request::builder()
        .uri("/products")
        .header("origin", "http://example.com")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn writes_reach_the_file() {
    let (app, dir) = test_app();

    let (_, body) = send(&app, Method::POST, "/products", Some(json!({"name": "disk"}))).await;
    let id = json_body(&body)["id"].clone();

    let on_disk: Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("db.json")).unwrap()).unwrap();
    assert_eq!(on_disk["products"][0]["id"], id);
}

#[tokio::test]
async fn injected_store_is_used() {
    let store = Arc::new(
        DocumentStore::open(StoreConfig::new(BackendConfig::in_memory())).unwrap(),
    );
    let state = ServerState::with_store(ServerConfig::default(), Arc::clone(&store));
    let app = build_router(Arc::new(state));

    send(&app, Method::POST, "/products", Some(json!({"name": "shared"}))).await;

    assert_eq!(store.collection("products").unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_store_file_prevents_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "not json").unwrap();

    let config = ServerConfig {
        db_path: path,
        ..ServerConfig::default()
    };
    assert!(ServerState::new(config).is_err());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, Method::GET, "/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"]["code"], "NOT_FOUND");
}
