use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A clinical supervision meeting, optionally about a specific client.
///
/// `client_id` becomes `None` when the referenced client is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SupervisionNote {
    pub id: i64,
    pub client_id: Option<i64>,
    pub supervision_date: NaiveDate,
    pub duration_minutes: Option<i64>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub personal_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
