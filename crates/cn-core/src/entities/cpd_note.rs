use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Continuing professional development activity. Not tied to a client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CpdNote {
    pub id: i64,
    pub cpd_date: NaiveDate,
    pub duration_hours: f64,
    pub organisation: Option<String>,
    pub title: Option<String>,
    pub medium: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
