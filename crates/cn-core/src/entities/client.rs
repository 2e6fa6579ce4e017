use chrono::{DateTime, Datelike, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AssessmentNote, SessionNote};
use crate::enums::ClientStatus;

/// A person receiving therapy from the practice.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub client_code: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub initial_assessment_date: Option<NaiveDate>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub gp_name: Option<String>,
    pub gp_practice: Option<String>,
    pub gp_phone: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Client {
    /// `"first last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on `today`, or `None` without a date of birth.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let dob = self.date_of_birth?;
        let had_birthday = (today.month(), today.day()) >= (dob.month(), dob.day());
        Some(today.year() - dob.year() - i32::from(!had_birthday))
    }

    #[must_use]
    pub const fn is_archived(&self) -> bool {
        matches!(self.status, ClientStatus::Archived)
    }
}

/// A client as served over HTTP: the stored row plus derived fields.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClientProfile {
    #[serde(flatten)]
    pub client: Client,
    pub full_name: String,
    pub age: Option<i32>,
}

impl ClientProfile {
    #[must_use]
    pub fn new(client: Client, today: NaiveDate) -> Self {
        Self {
            full_name: client.full_name(),
            age: client.age_on(today),
            client,
        }
    }
}

/// A client with its session and assessment notes, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClientWithNotes {
    #[serde(flatten)]
    pub profile: ClientProfile,
    pub session_notes: Vec<SessionNote>,
    pub assessment_notes: Vec<AssessmentNote>,
}
