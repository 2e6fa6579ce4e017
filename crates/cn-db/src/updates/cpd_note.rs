//! CPD note update patch and builder.

use chrono::NaiveDate;
use cn_core::errors::CoreError;
use cn_core::validation::{max_len, non_negative_hours};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpdNoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpd_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub organisation: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub medium: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
}

impl CpdNoteUpdate {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first field that fails.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(hours) = self.duration_hours {
            non_negative_hours("duration_hours", hours)?;
        }
        max_len("organisation", self.organisation.as_ref().and_then(Option::as_deref), 255)?;
        max_len("title", self.title.as_ref().and_then(Option::as_deref), 255)?;
        max_len("medium", self.medium.as_ref().and_then(Option::as_deref), 100)
    }
}

pub struct CpdNoteUpdateBuilder(CpdNoteUpdate);

impl CpdNoteUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CpdNoteUpdate::default())
    }

    #[must_use]
    pub fn cpd_date(mut self, cpd_date: NaiveDate) -> Self {
        self.0.cpd_date = Some(cpd_date);
        self
    }

    #[must_use]
    pub fn duration_hours(mut self, duration_hours: f64) -> Self {
        self.0.duration_hours = Some(duration_hours);
        self
    }

    #[must_use]
    pub fn organisation(mut self, organisation: Option<String>) -> Self {
        self.0.organisation = Some(organisation);
        self
    }

    #[must_use]
    pub fn title(mut self, title: Option<String>) -> Self {
        self.0.title = Some(title);
        self
    }

    #[must_use]
    pub fn medium(mut self, medium: Option<String>) -> Self {
        self.0.medium = Some(medium);
        self
    }

    #[must_use]
    pub fn content(mut self, content: Option<String>) -> Self {
        self.0.content = Some(content);
        self
    }

    #[must_use]
    pub fn build(self) -> CpdNoteUpdate {
        self.0
    }
}

impl Default for CpdNoteUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
