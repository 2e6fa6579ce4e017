//! `/api/clients` routes. Clients are returned with their derived name and age.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use cn_core::entities::{ClientProfile, ClientWithNotes};
use cn_core::enums::StatusFilter;
use cn_core::payloads::NewClient;
use cn_db::updates::client::ClientUpdate;
use serde::Deserialize;

use crate::error::{ApiJson, ApiPath, ApiQuery, ApiResult};
use crate::{AppState, today};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/clients", get(list).post(create))
        .route("/api/clients/", get(list).post(create))
        .route("/api/clients/:id", get(fetch).put(update).delete(remove))
        .route("/api/clients/:id/archive", post(archive))
        .route("/api/clients/:id/notes", get(with_notes))
}

const fn default_filter() -> StatusFilter {
    StatusFilter::Active
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_filter")]
    pub filter: StatusFilter,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveRequest {
    pub archive: bool,
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Vec<ClientProfile>> {
    let today = today();
    let clients = state.service().list_clients(query.filter).await?;
    Ok(Json(
        clients
            .into_iter()
            .map(|client| ClientProfile::new(client, today))
            .collect(),
    ))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewClient>,
) -> ApiResult<ClientProfile> {
    let client = state.service().create_client(new).await?;
    Ok(Json(ClientProfile::new(client, today())))
}

async fn fetch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<ClientProfile> {
    let client = state.service().get_client(id).await?;
    Ok(Json(ClientProfile::new(client, today())))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<ClientUpdate>,
) -> ApiResult<ClientProfile> {
    let client = state.service().update_client(id, update).await?;
    Ok(Json(ClientProfile::new(client, today())))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<ClientProfile> {
    let client = state.service().delete_client(id).await?;
    Ok(Json(ClientProfile::new(client, today())))
}

async fn archive(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<ArchiveRequest>,
) -> ApiResult<ClientProfile> {
    let client = state
        .service()
        .set_client_archived(id, request.archive)
        .await?;
    Ok(Json(ClientProfile::new(client, today())))
}

async fn with_notes(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<ClientWithNotes> {
    let view = state.service().get_client_with_notes(id, today()).await?;
    Ok(Json(view))
}
