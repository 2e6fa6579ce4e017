//! Database error types for cn-db.

use cn_core::enums::EntityKind;
use cn_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// No row with this id exists.
    #[error("{} {id} not found", .entity.label())]
    NotFound { entity: EntityKind, id: i64 },

    /// Input rejected before it reached the database.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Turn a failed write into `Conflict` when a UNIQUE constraint fired.
    ///
    /// `SQLite` reports these as `UNIQUE constraint failed: table.column`;
    /// libSQL may wrap that text in backticks.
    #[must_use]
    pub fn from_write(err: libsql::Error) -> Self {
        let message = err.to_string();
        match message.split_once("UNIQUE constraint failed: ") {
            Some((_, target)) => {
                let column = target
                    .split([',', ' ', '`', '"', '\''])
                    .next()
                    .and_then(|qualified| qualified.rsplit('.').next())
                    .unwrap_or(target);
                Self::Conflict(format!("{column} already exists"))
            }
            None => Self::LibSql(err),
        }
    }

    /// Whether this error means the requested row does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Invalid(CoreError::NotFound { .. })
        )
    }
}
