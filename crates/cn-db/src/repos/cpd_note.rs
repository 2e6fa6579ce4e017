//! CPD note repository.

use chrono::Utc;

use cn_core::entities::CpdNote;
use cn_core::enums::{EntityKind, SortOrder};
use cn_core::filters::CpdFilter;
use cn_core::payloads::NewCpdNote;

use crate::error::DatabaseError;
use crate::helpers::{
    Clauses, date_value, get_opt_string, parse_date, parse_datetime, parse_optional_datetime,
    text_or_null,
};
use crate::repos::{fetch_all, fetch_optional, push_date_bounds};
use crate::service::PracticeService;
use crate::updates::cpd_note::CpdNoteUpdate;

const SELECT_COLS: &str =
    "id, cpd_date, duration_hours, organisation, title, medium, content, created_at, updated_at";

fn row_to_cpd_note(row: &libsql::Row) -> Result<CpdNote, DatabaseError> {
    Ok(CpdNote {
        id: row.get(0)?,
        cpd_date: parse_date(&row.get::<String>(1)?)?,
        duration_hours: row.get(2)?,
        organisation: get_opt_string(row, 3)?,
        title: get_opt_string(row, 4)?,
        medium: get_opt_string(row, 5)?,
        content: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
    })
}

const fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound {
        entity: EntityKind::CpdNote,
        id,
    }
}

impl PracticeService {
    /// CPD notes in range, oldest first unless `filter.order` says otherwise.
    pub async fn list_cpd_notes(&self, filter: CpdFilter) -> Result<Vec<CpdNote>, DatabaseError> {
        let mut clauses = Clauses::new();
        push_date_bounds(&mut clauses, "cpd_date", filter.start_date, filter.end_date);
        let order = filter.order.unwrap_or(SortOrder::Asc).as_sql();
        let sql = format!(
            "SELECT {SELECT_COLS} FROM cpd_notes {} ORDER BY cpd_date {order}, id {order}",
            clauses.where_sql()
        );
        fetch_all(self.db().conn(), &sql, clauses.into_params(), row_to_cpd_note).await
    }

    pub async fn get_cpd_note(&self, id: i64) -> Result<CpdNote, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM cpd_notes WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        row_to_cpd_note(&row)
    }

    pub async fn create_cpd_note(&self, new: NewCpdNote) -> Result<CpdNote, DatabaseError> {
        new.validate()?;

        let sql = format!(
            "INSERT INTO cpd_notes (cpd_date, duration_hours, organisation, title, medium, \
             content, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {SELECT_COLS}"
        );
        let params = vec![
            date_value(new.cpd_date),
            libsql::Value::Real(new.duration_hours),
            text_or_null(new.organisation.as_deref()),
            text_or_null(new.title.as_deref()),
            text_or_null(new.medium.as_deref()),
            text_or_null(new.content.as_deref()),
            Utc::now().to_rfc3339().into(),
        ];
        let note = fetch_optional(self.db().conn(), &sql, params, row_to_cpd_note)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        tracing::info!(note_id = note.id, "cpd note created");
        Ok(note)
    }

    pub async fn update_cpd_note(
        &self,
        id: i64,
        update: CpdNoteUpdate,
    ) -> Result<CpdNote, DatabaseError> {
        update.validate()?;

        let mut clauses = Clauses::new();
        if let Some(cpd_date) = update.cpd_date {
            clauses.push("cpd_date", "=", date_value(cpd_date));
        }
        if let Some(hours) = update.duration_hours {
            clauses.push("duration_hours", "=", libsql::Value::Real(hours));
        }
        for (column, value) in [
            ("organisation", &update.organisation),
            ("title", &update.title),
            ("medium", &update.medium),
            ("content", &update.content),
        ] {
            if let Some(value) = value {
                clauses.push(column, "=", text_or_null(value.as_deref()));
            }
        }
        clauses.push("updated_at", "=", Utc::now().to_rfc3339());

        let id_idx = clauses.bind(id);
        let sql = format!(
            "UPDATE cpd_notes SET {} WHERE id = ?{id_idx} RETURNING {SELECT_COLS}",
            clauses.set_list()
        );
        let Some(note) =
            fetch_optional(self.db().conn(), &sql, clauses.into_params(), row_to_cpd_note).await?
        else {
            tracing::warn!(note_id = id, "cpd note not found for update");
            return Err(not_found(id));
        };
        tracing::info!(note_id = id, "cpd note updated");
        Ok(note)
    }

    pub async fn delete_cpd_note(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_by_id(EntityKind::CpdNote, id).await
    }
}
