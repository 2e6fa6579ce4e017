//! `/api/reports` routes.
//!
//! All three take an inclusive `start_date`/`end_date`. A start after the end
//! yields empty results rather than an error.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use cn_core::enums::StatusFilter;
use cn_core::reports::{ClientTimeRow, DateRange, SupervisionTimeReport, TotalsReport};
use serde::Deserialize;

use crate::AppState;
use crate::error::{ApiQuery, ApiResult};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reports/client-time", get(client_time))
        .route("/api/reports/supervision-time", get(supervision_time))
        .route("/api/reports/totals", get(totals))
}

const fn default_status() -> StatusFilter {
    StatusFilter::All
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: StatusFilter,
}

impl ReportQuery {
    const fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

async fn client_time(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ApiResult<Vec<ClientTimeRow>> {
    let rows = state
        .service()
        .client_time_report(query.range(), query.status)
        .await?;
    Ok(Json(rows))
}

async fn supervision_time(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ApiResult<SupervisionTimeReport> {
    Ok(Json(
        state.service().supervision_time_report(query.range()).await?,
    ))
}

async fn totals(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ApiResult<TotalsReport> {
    let report = state
        .service()
        .totals_report(query.range(), query.status)
        .await?;
    Ok(Json(report))
}
