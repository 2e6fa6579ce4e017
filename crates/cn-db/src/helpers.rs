//! Row-to-entity parsing helpers and SQL clause assembly.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual datetime
//! format issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, NaiveDate, Utc};
use cn_core::enums::EntityKind;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a `YYYY-MM-DD` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not an ISO date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Parse an optional `YYYY-MM-DD` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not an ISO date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_date(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all cn-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Map `EntityKind` to the corresponding SQL table name.
///
/// Uses exhaustive match, so adding a new `EntityKind` variant forces updating this.
#[must_use]
pub const fn entity_table(entity: EntityKind) -> &'static str {
    match entity {
        EntityKind::Client => "clients",
        EntityKind::SessionNote => "session_notes",
        EntityKind::AssessmentNote => "assessment_notes",
        EntityKind::SupervisionNote => "supervision_notes",
        EntityKind::CpdNote => "cpd_notes",
    }
}

/// Numbered SQL fragments and their bound values.
///
/// Used for both dynamic `SET` lists and `WHERE` conditions. Placeholders are
/// numbered in push order, so [`Self::bind`] may append further parameters
/// after the fragments.
#[derive(Debug, Default)]
pub struct Clauses {
    parts: Vec<String>,
    params: Vec<libsql::Value>,
}

impl Clauses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `"{column} {op} ?N"` bound to `value`.
    pub fn push(&mut self, column: &str, op: &str, value: impl Into<libsql::Value>) {
        let idx = self.bind(value);
        self.parts.push(format!("{column} {op} ?{idx}"));
    }

    /// Bind a parameter without a fragment and return its placeholder index.
    pub fn bind(&mut self, value: impl Into<libsql::Value>) -> usize {
        self.params.push(value.into());
        self.params.len()
    }

    /// Fragments joined for a `SET` list.
    #[must_use]
    pub fn set_list(&self) -> String {
        self.parts.join(", ")
    }

    /// `WHERE a AND b ...`, or an empty string when there are no conditions.
    #[must_use]
    pub fn where_sql(&self) -> String {
        if self.parts.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.parts.join(" AND "))
        }
    }

    #[must_use]
    pub fn into_params(self) -> Vec<libsql::Value> {
        self.params
    }
}

/// ISO text form used for every stored date.
#[must_use]
pub fn date_value(date: NaiveDate) -> libsql::Value {
    libsql::Value::Text(date.format("%Y-%m-%d").to_string())
}

#[must_use]
pub fn date_or_null(date: Option<NaiveDate>) -> libsql::Value {
    date.map_or(libsql::Value::Null, date_value)
}

/// Optional text for a nullable column. Blank text is stored as NULL, the
/// mirror of [`get_opt_string`] reading empty text back as `None`.
#[must_use]
pub fn text_or_null(value: Option<&str>) -> libsql::Value {
    match value {
        Some(s) if !s.trim().is_empty() => libsql::Value::Text(s.to_string()),
        _ => libsql::Value::Null,
    }
}

#[must_use]
pub fn int_or_null(value: Option<i64>) -> libsql::Value {
    value.map_or(libsql::Value::Null, libsql::Value::Integer)
}

/// SQLite has no boolean type; flags are stored as 0/1.
#[must_use]
pub fn flag_value(flag: bool) -> libsql::Value {
    libsql::Value::Integer(i64::from(flag))
}
