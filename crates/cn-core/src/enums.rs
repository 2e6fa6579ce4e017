//! Status enums, list filters, orderings, and entity kinds for Casenote.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! The `as_str()` value of each enum is also its SQL storage form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ClientStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a client.
///
/// ```text
/// active ⇄ archived
/// ```
///
/// Archiving is a soft delete: archived clients drop out of the default
/// listing but keep all their notes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Active,
    Archived,
}

impl ClientStatus {
    /// Status a client ends up in after an archive/unarchive request.
    #[must_use]
    pub const fn from_archive_flag(archive: bool) -> Self {
        if archive { Self::Archived } else { Self::Active }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StatusFilter
// ---------------------------------------------------------------------------

/// Which clients a listing or report should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Active,
    Archived,
    All,
}

impl StatusFilter {
    /// The single status this filter selects, or `None` for `All`.
    #[must_use]
    pub const fn status(self) -> Option<ClientStatus> {
        match self {
            Self::Active => Some(ClientStatus::Active),
            Self::Archived => Some(ClientStatus::Archived),
            Self::All => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::All => "all",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

/// Date ordering for note listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// SQL keyword for an `ORDER BY` clause.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order `{other}`, expected `asc` or `desc`")),
        }
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind of record stored by Casenote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Client,
    SessionNote,
    AssessmentNote,
    SupervisionNote,
    CpdNote,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::SessionNote => "session_note",
            Self::AssessmentNote => "assessment_note",
            Self::SupervisionNote => "supervision_note",
            Self::CpdNote => "cpd_note",
        }
    }

    /// Human-readable name used in API messages, e.g. `"Session note"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::SessionNote => "Session note",
            Self::AssessmentNote => "Assessment note",
            Self::SupervisionNote => "Supervision note",
            Self::CpdNote => "CPD note",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
