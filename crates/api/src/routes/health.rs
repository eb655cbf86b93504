//! Liveness probe for load balancers and deploy scripts.
//!
//! Always answers `200`; a lost database shows up as `"degraded"` so the
//! agency front end can tell a slow pool from a dead process.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = spycat_db::health_check(&state.pool).await;
    if let Err(e) = &db {
        tracing::warn!(error = %e, "Health check could not reach the database");
    }
    Json(HealthResponse::new(db.is_ok()))
}

/// `GET /health`, mounted at the root next to the resource routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
