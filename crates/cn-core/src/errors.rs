//! Cross-cutting error types for Casenote.
//!
//! Domain-specific errors (`DatabaseError`, `ConfigError`) are defined in
//! their respective crates. The HTTP-facing `ApiError` lives in `cn-server`
//! where all crate errors converge.

use thiserror::Error;

use crate::enums::EntityKind;

/// Errors that can be raised by any Casenote crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{} {id} not found", .entity.label())]
    NotFound { entity: EntityKind, id: i64 },

    /// A single field failed validation.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a field-level validation failure.
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = CoreError::invalid("email", "not a valid e-mail address");
        assert_eq!(err.to_string(), "email: not a valid e-mail address");
    }

    #[test]
    fn not_found_uses_entity_label() {
        let err = CoreError::NotFound {
            entity: EntityKind::SessionNote,
            id: 7,
        };
        assert_eq!(err.to_string(), "Session note 7 not found");
    }
}
