//! Assessment note repository.

use chrono::Utc;

use cn_core::entities::AssessmentNote;
use cn_core::enums::{EntityKind, SortOrder};
use cn_core::filters::NoteFilter;
use cn_core::payloads::NewAssessmentNote;

use crate::error::DatabaseError;
use crate::helpers::{
    Clauses, date_value, flag_value, get_bool, get_opt_string, parse_date, parse_datetime,
    parse_optional_datetime, text_or_null,
};
use crate::repos::{fetch_all, fetch_optional, note_conditions};
use crate::service::PracticeService;
use crate::updates::assessment_note::AssessmentNoteUpdate;

const SELECT_COLS: &str = "id, client_id, assessment_date, duration_minutes, is_paid, \
     content, created_at, updated_at";

fn row_to_assessment_note(row: &libsql::Row) -> Result<AssessmentNote, DatabaseError> {
    Ok(AssessmentNote {
        id: row.get(0)?,
        client_id: row.get(1)?,
        assessment_date: parse_date(&row.get::<String>(2)?)?,
        duration_minutes: row.get(3)?,
        is_paid: get_bool(row, 4)?,
        content: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
    })
}

const fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound {
        entity: EntityKind::AssessmentNote,
        id,
    }
}

impl PracticeService {
    pub async fn list_assessment_notes(
        &self,
        filter: NoteFilter,
    ) -> Result<Vec<AssessmentNote>, DatabaseError> {
        let clauses = note_conditions(&filter, "assessment_date");
        let order = filter.order.unwrap_or(SortOrder::Desc).as_sql();
        let sql = format!(
            "SELECT {SELECT_COLS} FROM assessment_notes {} \
             ORDER BY assessment_date {order}, id {order}",
            clauses.where_sql()
        );
        fetch_all(self.db().conn(), &sql, clauses.into_params(), row_to_assessment_note).await
    }

    pub async fn list_assessment_notes_for_client(
        &self,
        client_id: i64,
    ) -> Result<Vec<AssessmentNote>, DatabaseError> {
        self.list_assessment_notes(NoteFilter::for_client(client_id))
            .await
    }

    pub async fn get_assessment_note(&self, id: i64) -> Result<AssessmentNote, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM assessment_notes WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        row_to_assessment_note(&row)
    }

    pub async fn create_assessment_note(
        &self,
        new: NewAssessmentNote,
    ) -> Result<AssessmentNote, DatabaseError> {
        new.validate()?;
        self.ensure_client_exists(new.client_id).await?;

        let sql = format!(
            "INSERT INTO assessment_notes (client_id, assessment_date, duration_minutes, \
             is_paid, content, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING {SELECT_COLS}"
        );
        let params = vec![
            new.client_id.into(),
            date_value(new.assessment_date),
            new.duration_minutes.into(),
            flag_value(new.is_paid),
            text_or_null(new.content.as_deref()),
            Utc::now().to_rfc3339().into(),
        ];
        let note = fetch_optional(self.db().conn(), &sql, params, row_to_assessment_note)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        tracing::info!(note_id = note.id, client_id = note.client_id, "assessment note created");
        Ok(note)
    }

    pub async fn update_assessment_note(
        &self,
        id: i64,
        update: AssessmentNoteUpdate,
    ) -> Result<AssessmentNote, DatabaseError> {
        update.validate()?;

        let mut clauses = Clauses::new();
        if let Some(client_id) = update.client_id {
            self.ensure_client_exists(client_id).await?;
            clauses.push("client_id", "=", client_id);
        }
        if let Some(assessment_date) = update.assessment_date {
            clauses.push("assessment_date", "=", date_value(assessment_date));
        }
        if let Some(minutes) = update.duration_minutes {
            clauses.push("duration_minutes", "=", minutes);
        }
        if let Some(is_paid) = update.is_paid {
            clauses.push("is_paid", "=", flag_value(is_paid));
        }
        if let Some(ref content) = update.content {
            clauses.push("content", "=", text_or_null(content.as_deref()));
        }
        clauses.push("updated_at", "=", Utc::now().to_rfc3339());

        let id_idx = clauses.bind(id);
        let sql = format!(
            "UPDATE assessment_notes SET {} WHERE id = ?{id_idx} RETURNING {SELECT_COLS}",
            clauses.set_list()
        );
        let Some(note) = fetch_optional(
            self.db().conn(),
            &sql,
            clauses.into_params(),
            row_to_assessment_note,
        )
        .await?
        else {
            tracing::warn!(note_id = id, "assessment note not found for update");
            return Err(not_found(id));
        };
        tracing::info!(note_id = id, "assessment note updated");
        Ok(note)
    }

    pub async fn delete_assessment_note(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_by_id(EntityKind::AssessmentNote, id).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{create_test_client, date, test_service};
    use crate::updates::assessment_note::AssessmentNoteUpdateBuilder;

    #[tokio::test]
    async fn create_defaults_to_fifty_minutes() {
        let svc = test_service().await;
        let client = create_test_client(&svc, "Ada", "Byron").await;
        let note = svc
            .create_assessment_note(NewAssessmentNote::new(client.id, date("2024-01-10")))
            .await
            .unwrap();
        assert_eq!(note.duration_minutes, 50);
        assert!(!note.is_paid);
        assert_eq!(svc.get_assessment_note(note.id).await.unwrap(), note);
    }

    #[tokio::test]
    async fn update_to_unknown_client_is_rejected() {
        let svc = test_service().await;
        let client = create_test_client(&svc, "Ada", "Byron").await;
        let note = svc
            .create_assessment_note(NewAssessmentNote::new(client.id, date("2024-01-10")))
            .await
            .unwrap();

        let update = AssessmentNoteUpdate {
            client_id: Some(client.id + 100),
            ..AssessmentNoteUpdate::default()
        };
        let err = svc.update_assessment_note(note.id, update).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Invalid(_)), "{err}");
    }

    #[tokio::test]
    async fn update_duration_only() {
        let svc = test_service().await;
        let client = create_test_client(&svc, "Ada", "Byron").await;
        let mut new = NewAssessmentNote::new(client.id, date("2024-01-10"));
        new.content = Some("intake".into());
        let note = svc.create_assessment_note(new).await.unwrap();

        let update = AssessmentNoteUpdateBuilder::new().duration_minutes(75).build();
        let updated = svc.update_assessment_note(note.id, update).await.unwrap();
        assert_eq!(updated.duration_minutes, 75);
        assert_eq!(updated.content.as_deref(), Some("intake"));
        assert_eq!(updated.assessment_date, note.assessment_date);
    }

    #[tokio::test]
    async fn missing_note_is_not_found() {
        let svc = test_service().await;
        assert!(svc.get_assessment_note(3).await.unwrap_err().is_not_found());
        assert!(svc.delete_assessment_note(3).await.unwrap_err().is_not_found());
    }
}
