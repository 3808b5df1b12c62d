//! The health check route.

use axum::Json;
use serde_json::{Value, json};

/// Report that the server is up.
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "API Running",
    }))
}
