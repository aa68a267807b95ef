use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use server::{build_router, ServerConfig, ServerState};
use std::sync::Arc;
use store::{BackendConfig, DocumentStore, StoreConfig};
use tower::ServiceExt;

fn create_test_state(port: u16) -> Arc<ServerState> {
    let store = DocumentStore::open(StoreConfig::new(BackendConfig::in_memory()))
        .expect("Failed to open store");
    let config = ServerConfig {
        port,
        ..ServerConfig::default()
    };
    Arc::new(ServerState::with_store(config, Arc::new(store)))
}

async fn get(state: Arc<ServerState>, uri: &str) -> (StatusCode, String) {
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_openapi_document_lists_product_operations() {
    let (status, body) = get(create_test_state(4000), "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);

    let doc: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(doc["info"]["title"], "api-test");
    assert_eq!(doc["info"]["version"], "1.0.0");

    let collection = &doc["paths"]["/products"];
    assert!(collection.get("get").is_some());
    assert!(collection.get("post").is_some());

    let item = &doc["paths"]["/products/{id}"];
    for method in ["get", "put", "delete"] {
        assert!(item.get(method).is_some(), "missing {method} /products/{{id}}");
    }

    assert!(doc["components"]["schemas"].get("ProductDoc").is_some());
}

#[tokio::test]
async fn test_openapi_server_url_follows_port() {
    let (_, body) = get(create_test_state(5123), "/api-docs/openapi.json").await;
    let doc: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(doc["servers"][0]["url"], "http://localhost:5123");
}

#[tokio::test]
async fn test_swagger_ui_page() {
    let (status, body) = get(create_test_state(4000), "/api-docs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("SwaggerUIBundle"));
    assert!(body.contains("/api-docs/openapi.json"));
}

#[tokio::test]
async fn test_health_check() {
    let state = create_test_state(4000);
    state
        .catalog
        .create(serde_json::Map::new())
        .expect("create succeeds");

    let (status, body) = get(state, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["products"], 1);
    assert_eq!(health["store"], "memory");
}
