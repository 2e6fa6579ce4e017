use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Session type recorded when none is given.
pub const DEFAULT_SESSION_TYPE: &str = "In-Person";

/// A billable therapy session with one client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionNote {
    pub id: i64,
    pub client_id: i64,
    pub session_date: NaiveDate,
    pub duration_minutes: i64,
    pub is_paid: bool,
    pub session_type: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
