//! Create payloads: the JSON bodies accepted when a record is first stored.
//!
//! Required fields are non-`Option` so a missing key fails deserialization.
//! Optional fields default when absent. `validate()` covers the checks serde
//! cannot express (e-mail shape, lengths, non-negative durations).

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::DEFAULT_SESSION_TYPE;
use crate::errors::CoreError;
use crate::validation::{
    NAME_MAX_LEN, email, max_len, non_negative_hours, non_negative_minutes, required_text,
};

const fn default_assessment_minutes() -> i64 {
    50
}

const fn default_cpd_hours() -> f64 {
    1.0
}

fn default_session_type() -> String {
    DEFAULT_SESSION_TYPE.to_string()
}

/// Body of `POST /api/clients/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub client_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub initial_assessment_date: Option<NaiveDate>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_relationship: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub gp_name: Option<String>,
    #[serde(default)]
    pub gp_practice: Option<String>,
    #[serde(default)]
    pub gp_phone: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first field that fails.
    pub fn validate(&self) -> Result<(), CoreError> {
        required_text("first_name", &self.first_name, NAME_MAX_LEN)?;
        required_text("last_name", &self.last_name, NAME_MAX_LEN)?;
        max_len("client_code", self.client_code.as_deref(), 50)?;
        // Blank is stored as no address.
        if let Some(address) = self.email.as_deref().filter(|a| !a.trim().is_empty()) {
            email("email", address)?;
        }
        max_len("phone", self.phone.as_deref(), 50)?;
        max_len("address1", self.address1.as_deref(), 255)?;
        max_len("address2", self.address2.as_deref(), 255)?;
        max_len("city", self.city.as_deref(), 100)?;
        max_len("postcode", self.postcode.as_deref(), 20)?;
        max_len("emergency_contact_name", self.emergency_contact_name.as_deref(), 100)?;
        max_len(
            "emergency_contact_relationship",
            self.emergency_contact_relationship.as_deref(),
            100,
        )?;
        max_len("emergency_contact_phone", self.emergency_contact_phone.as_deref(), 50)?;
        max_len("gp_name", self.gp_name.as_deref(), 100)?;
        max_len("gp_practice", self.gp_practice.as_deref(), 255)?;
        max_len("gp_phone", self.gp_phone.as_deref(), 50)?;
        Ok(())
    }
}

/// Body of `POST /api/sessions/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewSessionNote {
    pub client_id: i64,
    pub session_date: NaiveDate,
    pub duration_minutes: i64,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default = "default_session_type")]
    pub session_type: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewSessionNote {
    #[must_use]
    pub fn new(client_id: i64, session_date: NaiveDate, duration_minutes: i64) -> Self {
        Self {
            client_id,
            session_date,
            duration_minutes,
            is_paid: false,
            session_type: default_session_type(),
            content: None,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first field that fails.
    pub fn validate(&self) -> Result<(), CoreError> {
        non_negative_minutes("duration_minutes", self.duration_minutes)?;
        required_text("session_type", &self.session_type, 50)
    }
}

/// Body of `POST /api/assessments/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAssessmentNote {
    pub client_id: i64,
    pub assessment_date: NaiveDate,
    #[serde(default = "default_assessment_minutes")]
    pub duration_minutes: i64,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewAssessmentNote {
    #[must_use]
    pub const fn new(client_id: i64, assessment_date: NaiveDate) -> Self {
        Self {
            client_id,
            assessment_date,
            duration_minutes: default_assessment_minutes(),
            is_paid: false,
            content: None,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the duration is negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        non_negative_minutes("duration_minutes", self.duration_minutes)
    }
}

/// Body of `POST /api/supervisions/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewSupervisionNote {
    #[serde(default)]
    pub client_id: Option<i64>,
    pub supervision_date: NaiveDate,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub personal_notes: Option<String>,
}

impl NewSupervisionNote {
    #[must_use]
    pub const fn new(supervision_date: NaiveDate) -> Self {
        Self {
            client_id: None,
            supervision_date,
            duration_minutes: None,
            summary: None,
            content: None,
            personal_notes: None,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the duration is negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.duration_minutes {
            Some(minutes) => non_negative_minutes("duration_minutes", minutes),
            None => Ok(()),
        }
    }
}

/// Body of `POST /api/cpd/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewCpdNote {
    pub cpd_date: NaiveDate,
    #[serde(default = "default_cpd_hours")]
    pub duration_hours: f64,
    #[serde(default)]
    pub organisation: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewCpdNote {
    #[must_use]
    pub const fn new(cpd_date: NaiveDate) -> Self {
        Self {
            cpd_date,
            duration_hours: default_cpd_hours(),
            organisation: None,
            title: None,
            medium: None,
            content: None,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the duration is negative or not finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        non_negative_hours("duration_hours", self.duration_hours)?;
        max_len("organisation", self.organisation.as_deref(), 255)?;
        max_len("title", self.title.as_deref(), 255)?;
        max_len("medium", self.medium.as_deref(), 100)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn client_requires_names() {
        let err = serde_json::from_str::<NewClient>(r#"{"first_name": "Ada"}"#).unwrap_err();
        assert!(err.to_string().contains("last_name"), "{err}");
    }

    #[test]
    fn client_validation_checks_email() {
        let mut client = NewClient::new("Ada", "Byron");
        assert!(client.validate().is_ok());

        client.email = Some("not-an-email".into());
        let err = client.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "email"));

        client.email = Some(String::new());
        assert!(client.validate().is_ok());
    }

    #[test]
    fn session_note_defaults() {
        let note: NewSessionNote = serde_json::from_str(
            r#"{"client_id": 3, "session_date": "2024-03-01", "duration_minutes": 50}"#,
        )
        .unwrap();
        assert_eq!(note, NewSessionNote::new(3, date("2024-03-01"), 50));
        assert_eq!(note.session_type, "In-Person");
        assert!(!note.is_paid);
    }

    #[test]
    fn session_note_rejects_negative_duration() {
        let note = NewSessionNote::new(1, date("2024-03-01"), -10);
        assert!(note.validate().is_err());
    }

    #[test]
    fn assessment_note_defaults_to_fifty_minutes() {
        let note: NewAssessmentNote =
            serde_json::from_str(r#"{"client_id": 1, "assessment_date": "2024-01-10"}"#).unwrap();
        assert_eq!(note.duration_minutes, 50);
        assert!(note.validate().is_ok());
    }

    #[test]
    fn supervision_note_requires_date() {
        let err = serde_json::from_str::<NewSupervisionNote>(r#"{"summary": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("supervision_date"), "{err}");
    }

    #[test]
    fn cpd_note_rejects_negative_hours() {
        let mut note = NewCpdNote::new(date("2024-05-05"));
        assert!(note.validate().is_ok());
        note.duration_hours = -1.0;
        assert!(note.validate().is_err());
    }
}
