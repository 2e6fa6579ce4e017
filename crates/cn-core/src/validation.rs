//! Field-level validation shared by create payloads and update patches.
//!
//! Each check returns `CoreError::Validation` naming the offending field.

use crate::errors::CoreError;

/// Maximum stored length of a client's first or last name.
pub const NAME_MAX_LEN: usize = 100;

/// Reject blank or over-long required text.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `value` is blank or longer than `max` chars.
pub fn required_text(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "must not be empty"));
    }
    max_len(field, Some(value), max)
}

/// Reject optional text longer than `max` characters.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the value is too long.
pub fn max_len(field: &str, value: Option<&str>, max: usize) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max => Err(CoreError::invalid(
            field,
            format!("must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

/// Check the shape of an e-mail address: `local@domain.tld`, no whitespace.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the address is malformed.
pub fn email(field: &str, value: &str) -> Result<(), CoreError> {
    let invalid = || CoreError::invalid(field, "value is not a valid email address");

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    max_len(field, Some(value), 255)
}

/// Reject negative minute counts.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `minutes` is negative.
pub fn non_negative_minutes(field: &str, minutes: i64) -> Result<(), CoreError> {
    if minutes < 0 {
        return Err(CoreError::invalid(field, "must not be negative"));
    }
    Ok(())
}

/// Reject negative or non-finite hour counts.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `hours` is negative, NaN, or infinite.
pub fn non_negative_hours(field: &str, hours: f64) -> Result<(), CoreError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(CoreError::invalid(field, "must be a non-negative number"));
    }
    Ok(())
}
