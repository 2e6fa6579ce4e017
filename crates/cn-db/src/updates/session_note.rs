//! Session note update patch and builder.

use chrono::NaiveDate;
use cn_core::errors::CoreError;
use cn_core::validation::{non_negative_minutes, required_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
}

impl SessionNoteUpdate {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first field that fails.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(minutes) = self.duration_minutes {
            non_negative_minutes("duration_minutes", minutes)?;
        }
        if let Some(ref session_type) = self.session_type {
            required_text("session_type", session_type, 50)?;
        }
        Ok(())
    }
}

pub struct SessionNoteUpdateBuilder(SessionNoteUpdate);

impl SessionNoteUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SessionNoteUpdate::default())
    }

    #[must_use]
    pub fn client_id(mut self, client_id: i64) -> Self {
        self.0.client_id = Some(client_id);
        self
    }

    #[must_use]
    pub fn session_date(mut self, session_date: NaiveDate) -> Self {
        self.0.session_date = Some(session_date);
        self
    }

    #[must_use]
    pub fn duration_minutes(mut self, duration_minutes: i64) -> Self {
        self.0.duration_minutes = Some(duration_minutes);
        self
    }

    #[must_use]
    pub fn is_paid(mut self, is_paid: bool) -> Self {
        self.0.is_paid = Some(is_paid);
        self
    }

    #[must_use]
    pub fn session_type(mut self, session_type: impl Into<String>) -> Self {
        self.0.session_type = Some(session_type.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: Option<String>) -> Self {
        self.0.content = Some(content);
        self
    }

    #[must_use]
    pub fn build(self) -> SessionNoteUpdate {
        self.0
    }
}

impl Default for SessionNoteUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
