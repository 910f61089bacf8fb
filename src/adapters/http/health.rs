//! Liveness endpoint.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": env!("CARGO_PKG_NAME") }))
}

pub fn health_router() -> Router {
    Router::new().route("/health", get(health))
}
