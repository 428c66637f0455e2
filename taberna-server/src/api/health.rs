//! Health check endpoints
//!
//! `/healthz` answers as long as the process serves requests, `/readyz`
//! only while the database responds. `/health` reports both.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(liveness))
        .route("/readyz", get(readiness))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_ok = state.db.ping().await;
    let status = if db_ok { "ok" } else { "degraded" };
    Json(json!({
        "status": status,
        "db": db_ok,
        "service": "taberna-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.db.ping().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        tracing::warn!("Readiness check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}
