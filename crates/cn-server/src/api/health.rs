use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiResult;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

/// Liveness plus a round trip to the database.
async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    state.service().ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}
