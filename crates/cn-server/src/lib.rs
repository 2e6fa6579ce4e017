//! # cn-server
//!
//! HTTP surface of Casenote: an axum router over [`PracticeService`], the
//! error mapping in [`error`], and the command-line entry point in
//! [`cli`] used by the `casenote` binary.

pub mod api;
pub mod cli;
pub mod error;

use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;
use cn_db::service::PracticeService;
use tower_http::trace::TraceLayer;

/// Shared handler state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PracticeService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: PracticeService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    #[must_use]
    pub fn service(&self) -> &PracticeService {
        &self.service
    }
}

/// Local calendar date used for derived client ages.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Build the full router with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::health::routes())
        .merge(api::clients::routes())
        .merge(api::sessions::routes())
        .merge(api::assessments::routes())
        .merge(api::supervisions::routes())
        .merge(api::cpd::routes())
        .merge(api::reports::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
