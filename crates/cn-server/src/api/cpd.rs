//! `/api/cpd` routes. CPD notes are practitioner-only and have no client.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use cn_core::entities::CpdNote;
use cn_core::enums::EntityKind;
use cn_core::filters::CpdFilter;
use cn_core::payloads::NewCpdNote;
use cn_db::updates::cpd_note::CpdNoteUpdate;

use crate::AppState;
use crate::api::Message;
use crate::error::{ApiJson, ApiPath, ApiQuery, ApiResult};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cpd", get(list).post(create))
        .route("/api/cpd/", get(list).post(create))
        .route("/api/cpd/:id", get(fetch).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CpdFilter>,
) -> ApiResult<Vec<CpdNote>> {
    Ok(Json(state.service().list_cpd_notes(filter).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewCpdNote>,
) -> ApiResult<CpdNote> {
    Ok(Json(state.service().create_cpd_note(new).await?))
}

async fn fetch(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<CpdNote> {
    Ok(Json(state.service().get_cpd_note(id).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<CpdNoteUpdate>,
) -> ApiResult<CpdNote> {
    Ok(Json(state.service().update_cpd_note(id, update).await?))
}

async fn remove(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Message> {
    state.service().delete_cpd_note(id).await?;
    Ok(Json(Message::deleted(EntityKind::CpdNote)))
}
