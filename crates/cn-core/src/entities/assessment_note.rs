use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An assessment appointment with one client. Billed like a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssessmentNote {
    pub id: i64,
    pub client_id: i64,
    pub assessment_date: NaiveDate,
    pub duration_minutes: i64,
    pub is_paid: bool,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
