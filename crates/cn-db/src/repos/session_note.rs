//! Session note repository.

use chrono::Utc;

use cn_core::entities::SessionNote;
use cn_core::enums::{EntityKind, SortOrder};
use cn_core::filters::NoteFilter;
use cn_core::payloads::NewSessionNote;

use crate::error::DatabaseError;
use crate::helpers::{
    Clauses, date_value, flag_value, get_bool, get_opt_string, parse_date, parse_datetime,
    parse_optional_datetime, text_or_null,
};
use crate::repos::{fetch_all, fetch_optional, note_conditions};
use crate::service::PracticeService;
use crate::updates::session_note::SessionNoteUpdate;

const SELECT_COLS: &str = "id, client_id, session_date, duration_minutes, is_paid, \
     session_type, content, created_at, updated_at";

fn row_to_session_note(row: &libsql::Row) -> Result<SessionNote, DatabaseError> {
    Ok(SessionNote {
        id: row.get(0)?,
        client_id: row.get(1)?,
        session_date: parse_date(&row.get::<String>(2)?)?,
        duration_minutes: row.get(3)?,
        is_paid: get_bool(row, 4)?,
        session_type: row.get(5)?,
        content: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
    })
}

const fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound {
        entity: EntityKind::SessionNote,
        id,
    }
}

impl PracticeService {
    /// Session notes matching `filter`, newest first unless `filter.order` says otherwise.
    pub async fn list_session_notes(
        &self,
        filter: NoteFilter,
    ) -> Result<Vec<SessionNote>, DatabaseError> {
        let clauses = note_conditions(&filter, "session_date");
        let order = filter.order.unwrap_or(SortOrder::Desc).as_sql();
        let sql = format!(
            "SELECT {SELECT_COLS} FROM session_notes {} ORDER BY session_date {order}, id {order}",
            clauses.where_sql()
        );
        fetch_all(self.db().conn(), &sql, clauses.into_params(), row_to_session_note).await
    }

    /// All session notes for one client, newest first. Empty for an unknown client.
    pub async fn list_session_notes_for_client(
        &self,
        client_id: i64,
    ) -> Result<Vec<SessionNote>, DatabaseError> {
        self.list_session_notes(NoteFilter::for_client(client_id))
            .await
    }

    pub async fn get_session_note(&self, id: i64) -> Result<SessionNote, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM session_notes WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        row_to_session_note(&row)
    }

    pub async fn create_session_note(
        &self,
        new: NewSessionNote,
    ) -> Result<SessionNote, DatabaseError> {
        new.validate()?;
        self.ensure_client_exists(new.client_id).await?;

        let sql = format!(
            "INSERT INTO session_notes (client_id, session_date, duration_minutes, is_paid, \
             session_type, content, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             RETURNING {SELECT_COLS}"
        );
        let params = vec![
            new.client_id.into(),
            date_value(new.session_date),
            new.duration_minutes.into(),
            flag_value(new.is_paid),
            new.session_type.into(),
            text_or_null(new.content.as_deref()),
            Utc::now().to_rfc3339().into(),
        ];
        let note = fetch_optional(self.db().conn(), &sql, params, row_to_session_note)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        tracing::info!(note_id = note.id, client_id = note.client_id, "session note created");
        Ok(note)
    }

    pub async fn update_session_note(
        &self,
        id: i64,
        update: SessionNoteUpdate,
    ) -> Result<SessionNote, DatabaseError> {
        update.validate()?;
        if let Some(client_id) = update.client_id {
            self.ensure_client_exists(client_id).await?;
        }

        let mut clauses = Clauses::new();
        if let Some(client_id) = update.client_id {
            clauses.push("client_id", "=", client_id);
        }
        if let Some(session_date) = update.session_date {
            clauses.push("session_date", "=", date_value(session_date));
        }
        if let Some(minutes) = update.duration_minutes {
            clauses.push("duration_minutes", "=", minutes);
        }
        if let Some(is_paid) = update.is_paid {
            clauses.push("is_paid", "=", flag_value(is_paid));
        }
        if let Some(ref session_type) = update.session_type {
            clauses.push("session_type", "=", session_type.as_str());
        }
        if let Some(ref content) = update.content {
            clauses.push("content", "=", text_or_null(content.as_deref()));
        }
        clauses.push("updated_at", "=", Utc::now().to_rfc3339());

        let id_idx = clauses.bind(id);
        let sql = format!(
            "UPDATE session_notes SET {} WHERE id = ?{id_idx} RETURNING {SELECT_COLS}",
            clauses.set_list()
        );
        let Some(note) =
            fetch_optional(self.db().conn(), &sql, clauses.into_params(), row_to_session_note)
                .await?
        else {
            tracing::warn!(note_id = id, "session note not found for update");
            return Err(not_found(id));
        };
        tracing::info!(note_id = id, "session note updated");
        Ok(note)
    }

    pub async fn delete_session_note(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_by_id(EntityKind::SessionNote, id).await
    }
}
