//! Supervision note update patch and builder.

use chrono::NaiveDate;
use cn_core::errors::CoreError;
use cn_core::validation::non_negative_minutes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisionNoteUpdate {
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervision_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_minutes: Option<Option<i64>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub personal_notes: Option<Option<String>>,
}

impl SupervisionNoteUpdate {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a patched duration is negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.duration_minutes {
            Some(Some(minutes)) => non_negative_minutes("duration_minutes", minutes),
            _ => Ok(()),
        }
    }
}

pub struct SupervisionNoteUpdateBuilder(SupervisionNoteUpdate);

impl SupervisionNoteUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SupervisionNoteUpdate::default())
    }

    #[must_use]
    pub fn client_id(mut self, client_id: Option<i64>) -> Self {
        self.0.client_id = Some(client_id);
        self
    }

    #[must_use]
    pub fn supervision_date(mut self, supervision_date: NaiveDate) -> Self {
        self.0.supervision_date = Some(supervision_date);
        self
    }

    #[must_use]
    pub fn duration_minutes(mut self, duration_minutes: Option<i64>) -> Self {
        self.0.duration_minutes = Some(duration_minutes);
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: Option<String>) -> Self {
        self.0.summary = Some(summary);
        self
    }

    #[must_use]
    pub fn content(mut self, content: Option<String>) -> Self {
        self.0.content = Some(content);
        self
    }

    #[must_use]
    pub fn personal_notes(mut self, personal_notes: Option<String>) -> Self {
        self.0.personal_notes = Some(personal_notes);
        self
    }

    #[must_use]
    pub fn build(self) -> SupervisionNoteUpdate {
        self.0
    }
}

impl Default for SupervisionNoteUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
