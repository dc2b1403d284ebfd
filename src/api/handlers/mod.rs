pub mod ingest;
pub mod market;
pub mod portfolio;
pub mod watchlist;

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
