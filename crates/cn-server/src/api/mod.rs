//! Route handlers, one module per resource.
//!
//! Each module exposes `routes()` with its full paths. Collection routes are
//! registered both with and without a trailing slash.

pub mod assessments;
pub mod clients;
pub mod cpd;
pub mod health;
pub mod reports;
pub mod sessions;
pub mod supervisions;

use serde::Serialize;

/// Body returned by note deletes.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    #[must_use]
    pub fn deleted(entity: cn_core::enums::EntityKind) -> Self {
        Self {
            message: format!("{} deleted", entity.label()),
        }
    }
}
