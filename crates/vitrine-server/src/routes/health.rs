//! Health check route.

use axum::Json;
use serde_json::{json, Value};

/// GET /health — liveness probe, outside the auth gate.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
