//! Repository modules implementing CRUD operations for all Casenote entities.
//!
//! Each module adds methods to `PracticeService` via `impl PracticeService` blocks.

pub mod assessment_note;
pub mod client;
pub mod cpd_note;
pub mod report;
pub mod session_note;
pub mod supervision_note;

use chrono::NaiveDate;
use cn_core::enums::EntityKind;
use cn_core::filters::NoteFilter;

use crate::error::DatabaseError;
use crate::helpers::{Clauses, date_value, entity_table};
use crate::service::PracticeService;

/// Run a statement that yields at most one row and map that row.
///
/// Used for `... RETURNING` writes, so constraint failures surfacing on the
/// first step are classified like failures at prepare time.
pub(crate) async fn fetch_optional<T>(
    conn: &libsql::Connection,
    sql: &str,
    params: Vec<libsql::Value>,
    map: fn(&libsql::Row) -> Result<T, DatabaseError>,
) -> Result<Option<T>, DatabaseError> {
    let mut rows = conn
        .query(sql, libsql::params_from_iter(params))
        .await
        .map_err(DatabaseError::from_write)?;
    match rows.next().await.map_err(DatabaseError::from_write)? {
        Some(row) => Ok(Some(map(&row)?)),
        None => Ok(None),
    }
}

/// Run a read query and map every row.
pub(crate) async fn fetch_all<T>(
    conn: &libsql::Connection,
    sql: &str,
    params: Vec<libsql::Value>,
    map: fn(&libsql::Row) -> Result<T, DatabaseError>,
) -> Result<Vec<T>, DatabaseError> {
    let mut rows = conn.query(sql, libsql::params_from_iter(params)).await?;
    let mut items = Vec::new();
    while let Some(row) = rows.next().await? {
        items.push(map(&row)?);
    }
    Ok(items)
}

impl PracticeService {
    /// Delete one row of `entity` by id.
    pub(crate) async fn delete_by_id(&self, entity: EntityKind, id: i64) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", entity_table(entity));
        let deleted = self.db().conn().execute(&sql, [id]).await?;
        if deleted == 0 {
            tracing::warn!(%entity, id, "not found for deletion");
            return Err(DatabaseError::NotFound { entity, id });
        }
        tracing::info!(%entity, id, "deleted");
        Ok(())
    }
}

/// WHERE conditions for a note listing; `date_column` names the note's date.
pub(crate) fn note_conditions(filter: &NoteFilter, date_column: &str) -> Clauses {
    let mut clauses = Clauses::new();
    if let Some(client_id) = filter.client_id {
        clauses.push("client_id", "=", client_id);
    }
    push_date_bounds(&mut clauses, date_column, filter.start_date, filter.end_date);
    clauses
}

/// Inclusive `date_column` bounds; either side may be open.
pub(crate) fn push_date_bounds(
    clauses: &mut Clauses,
    date_column: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) {
    if let Some(start) = start {
        clauses.push(date_column, ">=", date_value(start));
    }
    if let Some(end) = end {
        clauses.push(date_column, "<=", date_value(end));
    }
}
