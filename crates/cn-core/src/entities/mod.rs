//! Entity structs for all Casenote records.
//!
//! Each entity maps to one table in the libSQL database (see
//! `cn-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod assessment_note;
mod client;
mod cpd_note;
mod session_note;
mod supervision_note;

pub use assessment_note::AssessmentNote;
pub use client::{Client, ClientProfile, ClientWithNotes};
pub use cpd_note::CpdNote;
pub use session_note::{DEFAULT_SESSION_TYPE, SessionNote};
pub use supervision_note::SupervisionNote;
