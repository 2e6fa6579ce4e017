//! Listing filters shared by the note services and the HTTP query strings.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};

use crate::enums::SortOrder;

/// Narrows a session, assessment, or supervision listing.
///
/// Every field is optional. Dates are inclusive. Values are read as
/// query-string text; an empty value counts as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct NoteFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub client_id: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub order: Option<SortOrder>,
}

impl NoteFilter {
    #[must_use]
    pub const fn for_client(client_id: i64) -> Self {
        Self {
            client_id: Some(client_id),
            start_date: None,
            end_date: None,
            order: None,
        }
    }

    #[must_use]
    pub const fn between(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub const fn ordered(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }
}

/// Narrows a CPD listing. CPD notes have no client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct CpdFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub order: Option<SortOrder>,
}

/// Read a query-string value, treating an empty one (`?client_id=`) as absent.
fn blank_as_none<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
