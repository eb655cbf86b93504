//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use spycat_api::config::{CatalogConfig, ServerConfig};
use spycat_api::router::build_app_router;
use spycat_api::state::AppState;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. Catalog sync is disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        catalog: CatalogConfig::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Insert breeds the way catalog sync would.
pub async fn seed_breeds(pool: &PgPool) {
    let state = AppState::new(pool.clone(), test_config());
    for (catalog_id, name) in [("abys", "Abyssinian"), ("siam", "Siamese")] {
        state.services.breeds.upsert(catalog_id, name).await.unwrap();
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json)).await
}

pub async fn put_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(json)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Create a cat through the API and return its id.
pub async fn create_cat(pool: &PgPool, name: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/cat/",
        serde_json::json!({
            "name": name,
            "breed": "Siamese",
            "years_experience": 3,
            "salary": 1500.0
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create a mission with the given target names and return its JSON.
pub async fn create_mission(pool: &PgPool, targets: &[&str]) -> Value {
    let targets: Vec<Value> = targets
        .iter()
        .map(|name| serde_json::json!({"name": name, "country": "FR"}))
        .collect();
    let response = post_json(
        build_test_app(pool.clone()),
        "/mission/",
        serde_json::json!({"title": "Operation Mouse", "targets": targets}),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await
}
