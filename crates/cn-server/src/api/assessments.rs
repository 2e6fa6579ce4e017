use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use cn_core::entities::AssessmentNote;
use cn_core::enums::EntityKind;
use cn_core::filters::NoteFilter;
use cn_core::payloads::NewAssessmentNote;
use cn_db::updates::assessment_note::AssessmentNoteUpdate;

use crate::AppState;
use crate::api::Message;
use crate::error::{ApiJson, ApiPath, ApiQuery, ApiResult};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/assessments", get(list).post(create))
        .route("/api/assessments/", get(list).post(create))
        .route("/api/assessments/client/:client_id", get(list_for_client))
        .route("/api/assessments/:id", get(fetch).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<NoteFilter>,
) -> ApiResult<Vec<AssessmentNote>> {
    Ok(Json(state.service().list_assessment_notes(filter).await?))
}

async fn list_for_client(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<i64>,
) -> ApiResult<Vec<AssessmentNote>> {
    let notes = state
        .service()
        .list_assessment_notes_for_client(client_id)
        .await?;
    Ok(Json(notes))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewAssessmentNote>,
) -> ApiResult<AssessmentNote> {
    Ok(Json(state.service().create_assessment_note(new).await?))
}

async fn fetch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<AssessmentNote> {
    Ok(Json(state.service().get_assessment_note(id).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<AssessmentNoteUpdate>,
) -> ApiResult<AssessmentNote> {
    let note = state.service().update_assessment_note(id, update).await?;
    Ok(Json(note))
}

async fn remove(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Message> {
    state.service().delete_assessment_note(id).await?;
    Ok(Json(Message::deleted(EntityKind::AssessmentNote)))
}
