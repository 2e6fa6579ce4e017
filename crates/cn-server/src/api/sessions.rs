//! `/api/sessions` routes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use cn_core::entities::SessionNote;
use cn_core::enums::EntityKind;
use cn_core::filters::NoteFilter;
use cn_core::payloads::NewSessionNote;
use cn_db::updates::session_note::SessionNoteUpdate;

use crate::AppState;
use crate::api::Message;
use crate::error::{ApiJson, ApiPath, ApiQuery, ApiResult};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", get(list).post(create))
        .route("/api/sessions/", get(list).post(create))
        .route("/api/sessions/client/:client_id", get(list_for_client))
        .route("/api/sessions/:id", get(fetch).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<NoteFilter>,
) -> ApiResult<Vec<SessionNote>> {
    Ok(Json(state.service().list_session_notes(filter).await?))
}

async fn list_for_client(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<i64>,
) -> ApiResult<Vec<SessionNote>> {
    Ok(Json(
        state
            .service()
            .list_session_notes_for_client(client_id)
            .await?,
    ))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewSessionNote>,
) -> ApiResult<SessionNote> {
    Ok(Json(state.service().create_session_note(new).await?))
}

async fn fetch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<SessionNote> {
    Ok(Json(state.service().get_session_note(id).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<SessionNoteUpdate>,
) -> ApiResult<SessionNote> {
    Ok(Json(state.service().update_session_note(id, update).await?))
}

async fn remove(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Message> {
    state.service().delete_session_note(id).await?;
    Ok(Json(Message::deleted(EntityKind::SessionNote)))
}
