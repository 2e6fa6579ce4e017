//! Update patch types for entity mutations.
//!
//! Each patch has `Option` fields. Only `Some` fields generate SET clauses in
//! the dynamic UPDATE SQL. Nullable columns use `Option<Option<T>>` so that an
//! explicit JSON `null` clears the column while an absent key leaves it alone.
//! Builders produce the same patches for callers that are not decoding JSON.

pub mod assessment_note;
pub mod client;
pub mod cpd_note;
pub mod session_note;
pub mod supervision_note;
