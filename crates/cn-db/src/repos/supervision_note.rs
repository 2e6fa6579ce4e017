//! Supervision note repository.

use chrono::Utc;

use cn_core::entities::SupervisionNote;
use cn_core::enums::{EntityKind, SortOrder};
use cn_core::filters::NoteFilter;
use cn_core::payloads::NewSupervisionNote;

use crate::error::DatabaseError;
use crate::helpers::{
    Clauses, date_value, get_opt_string, int_or_null, parse_date, parse_datetime,
    parse_optional_datetime, text_or_null,
};
use crate::repos::{fetch_all, fetch_optional, note_conditions};
use crate::service::PracticeService;
use crate::updates::supervision_note::SupervisionNoteUpdate;

const SELECT_COLS: &str = "id, client_id, supervision_date, duration_minutes, summary, \
     content, personal_notes, created_at, updated_at";

fn row_to_supervision_note(row: &libsql::Row) -> Result<SupervisionNote, DatabaseError> {
    Ok(SupervisionNote {
        id: row.get(0)?,
        client_id: row.get::<Option<i64>>(1)?,
        supervision_date: parse_date(&row.get::<String>(2)?)?,
        duration_minutes: row.get::<Option<i64>>(3)?,
        summary: get_opt_string(row, 4)?,
        content: get_opt_string(row, 5)?,
        personal_notes: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
    })
}

const fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound {
        entity: EntityKind::SupervisionNote,
        id,
    }
}

impl PracticeService {
    pub async fn list_supervision_notes(
        &self,
        filter: NoteFilter,
    ) -> Result<Vec<SupervisionNote>, DatabaseError> {
        let clauses = note_conditions(&filter, "supervision_date");
        let order = filter.order.unwrap_or(SortOrder::Desc).as_sql();
        let sql = format!(
            "SELECT {SELECT_COLS} FROM supervision_notes {} \
             ORDER BY supervision_date {order}, id {order}",
            clauses.where_sql()
        );
        fetch_all(self.db().conn(), &sql, clauses.into_params(), row_to_supervision_note).await
    }

    pub async fn get_supervision_note(&self, id: i64) -> Result<SupervisionNote, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM supervision_notes WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        row_to_supervision_note(&row)
    }

    pub async fn create_supervision_note(
        &self,
        new: NewSupervisionNote,
    ) -> Result<SupervisionNote, DatabaseError> {
        new.validate()?;
        if let Some(client_id) = new.client_id {
            self.ensure_client_exists(client_id).await?;
        }

        let sql = format!(
            "INSERT INTO supervision_notes (client_id, supervision_date, duration_minutes, \
             summary, content, personal_notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             RETURNING {SELECT_COLS}"
        );
        let params = vec![
            int_or_null(new.client_id),
            date_value(new.supervision_date),
            int_or_null(new.duration_minutes),
            text_or_null(new.summary.as_deref()),
            text_or_null(new.content.as_deref()),
            text_or_null(new.personal_notes.as_deref()),
            Utc::now().to_rfc3339().into(),
        ];
        let note = fetch_optional(self.db().conn(), &sql, params, row_to_supervision_note)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        tracing::info!(note_id = note.id, "supervision note created");
        Ok(note)
    }

    pub async fn update_supervision_note(
        &self,
        id: i64,
        update: SupervisionNoteUpdate,
    ) -> Result<SupervisionNote, DatabaseError> {
        update.validate()?;

        let mut clauses = Clauses::new();
        if let Some(client_id) = update.client_id {
            if let Some(client_id) = client_id {
                self.ensure_client_exists(client_id).await?;
            }
            clauses.push("client_id", "=", int_or_null(client_id));
        }
        if let Some(supervision_date) = update.supervision_date {
            clauses.push("supervision_date", "=", date_value(supervision_date));
        }
        if let Some(minutes) = update.duration_minutes {
            clauses.push("duration_minutes", "=", int_or_null(minutes));
        }
        if let Some(ref summary) = update.summary {
            clauses.push("summary", "=", text_or_null(summary.as_deref()));
        }
        if let Some(ref content) = update.content {
            clauses.push("content", "=", text_or_null(content.as_deref()));
        }
        if let Some(ref personal_notes) = update.personal_notes {
            clauses.push("personal_notes", "=", text_or_null(personal_notes.as_deref()));
        }
        clauses.push("updated_at", "=", Utc::now().to_rfc3339());

        let id_idx = clauses.bind(id);
        let sql = format!(
            "UPDATE supervision_notes SET {} WHERE id = ?{id_idx} RETURNING {SELECT_COLS}",
            clauses.set_list()
        );
        let Some(note) = fetch_optional(
            self.db().conn(),
            &sql,
            clauses.into_params(),
            row_to_supervision_note,
        )
        .await?
        else {
            tracing::warn!(note_id = id, "supervision note not found for update");
            return Err(not_found(id));
        };
        tracing::info!(note_id = id, "supervision note updated");
        Ok(note)
    }

    pub async fn delete_supervision_note(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_by_id(EntityKind::SupervisionNote, id).await
    }
}
