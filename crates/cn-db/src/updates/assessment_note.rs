//! Assessment note update patch and builder.

use chrono::NaiveDate;
use cn_core::errors::CoreError;
use cn_core::validation::non_negative_minutes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentNoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
}

impl AssessmentNoteUpdate {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a patched duration is negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.duration_minutes {
            Some(minutes) => non_negative_minutes("duration_minutes", minutes),
            None => Ok(()),
        }
    }
}

pub struct AssessmentNoteUpdateBuilder(AssessmentNoteUpdate);

impl AssessmentNoteUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AssessmentNoteUpdate::default())
    }

    #[must_use]
    pub fn assessment_date(mut self, assessment_date: NaiveDate) -> Self {
        self.0.assessment_date = Some(assessment_date);
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
    pub fn content(mut self, content: Option<String>) -> Self {
        self.0.content = Some(content);
        self
    }

    #[must_use]
    pub fn build(self) -> AssessmentNoteUpdate {
        self.0
    }
}

impl Default for AssessmentNoteUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
