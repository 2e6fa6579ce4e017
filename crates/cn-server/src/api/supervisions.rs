//! `/api/supervisions` routes. A supervision note may or may not name a client.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use cn_core::entities::SupervisionNote;
use cn_core::enums::EntityKind;
use cn_core::filters::NoteFilter;
use cn_core::payloads::NewSupervisionNote;
use cn_db::updates::supervision_note::SupervisionNoteUpdate;

use crate::AppState;
use crate::api::Message;
use crate::error::{ApiJson, ApiPath, ApiQuery, ApiResult};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/supervisions", get(list).post(create))
        .route("/api/supervisions/", get(list).post(create))
        .route("/api/supervisions/:id", get(fetch).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<NoteFilter>,
) -> ApiResult<Vec<SupervisionNote>> {
    Ok(Json(state.service().list_supervision_notes(filter).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewSupervisionNote>,
) -> ApiResult<SupervisionNote> {
    Ok(Json(state.service().create_supervision_note(new).await?))
}

async fn fetch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<SupervisionNote> {
    Ok(Json(state.service().get_supervision_note(id).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<SupervisionNoteUpdate>,
) -> ApiResult<SupervisionNote> {
    let note = state.service().update_supervision_note(id, update).await?;
    Ok(Json(note))
}

async fn remove(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Message> {
    state.service().delete_supervision_note(id).await?;
    Ok(Json(Message::deleted(EntityKind::SupervisionNote)))
}
