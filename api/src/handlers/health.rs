use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check endpoint
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let total_jobs = state.engine.read().await.total_jobs();
    let catalog = state.config.catalog.path.as_deref().unwrap_or("built-in");
    Json(json!({ "status": "ok", "catalog": catalog, "total_jobs": total_jobs }))
}
