//! Client repository: CRUD, archive toggle, and the client-with-notes view.

use chrono::{NaiveDate, Utc};

use cn_core::entities::{Client, ClientProfile, ClientWithNotes};
use cn_core::enums::{ClientStatus, EntityKind, StatusFilter};
use cn_core::errors::CoreError;
use cn_core::filters::NoteFilter;
use cn_core::payloads::NewClient;

use crate::error::DatabaseError;
use crate::helpers::{
    Clauses, date_or_null, get_opt_string, parse_datetime, parse_enum,
    parse_optional_date, parse_optional_datetime, text_or_null,
};
use crate::repos::{fetch_all, fetch_optional};
use crate::service::PracticeService;
use crate::updates::client::ClientUpdate;

const SELECT_COLS: &str = "id, first_name, last_name, client_code, email, phone, \
     date_of_birth, initial_assessment_date, address1, address2, city, postcode, \
     emergency_contact_name, emergency_contact_relationship, emergency_contact_phone, \
     gp_name, gp_practice, gp_phone, status, created_at, updated_at";

fn row_to_client(row: &libsql::Row) -> Result<Client, DatabaseError> {
    Ok(Client {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        client_code: get_opt_string(row, 3)?,
        email: get_opt_string(row, 4)?,
        phone: get_opt_string(row, 5)?,
        date_of_birth: parse_optional_date(get_opt_string(row, 6)?.as_deref())?,
        initial_assessment_date: parse_optional_date(get_opt_string(row, 7)?.as_deref())?,
        address1: get_opt_string(row, 8)?,
        address2: get_opt_string(row, 9)?,
        city: get_opt_string(row, 10)?,
        postcode: get_opt_string(row, 11)?,
        emergency_contact_name: get_opt_string(row, 12)?,
        emergency_contact_relationship: get_opt_string(row, 13)?,
        emergency_contact_phone: get_opt_string(row, 14)?,
        gp_name: get_opt_string(row, 15)?,
        gp_practice: get_opt_string(row, 16)?,
        gp_phone: get_opt_string(row, 17)?,
        status: parse_enum(&row.get::<String>(18)?)?,
        created_at: parse_datetime(&row.get::<String>(19)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 20)?.as_deref())?,
    })
}

/// Apply a nullable text patch field to the SET list.
fn set_text(clauses: &mut Clauses, column: &str, value: Option<&Option<String>>) {
    if let Some(value) = value {
        clauses.push(column, "=", text_or_null(value.as_deref()));
    }
}

/// Apply a nullable date patch field to the SET list.
fn set_date(clauses: &mut Clauses, column: &str, value: Option<&Option<NaiveDate>>) {
    if let Some(value) = value {
        clauses.push(column, "=", date_or_null(*value));
    }
}

impl PracticeService {
    /// Clients matching `filter`, ordered by first then last name.
    pub async fn list_clients(&self, filter: StatusFilter) -> Result<Vec<Client>, DatabaseError> {
        let mut clauses = Clauses::new();
        if let Some(status) = filter.status() {
            clauses.push("status", "=", status.as_str());
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM clients {} ORDER BY first_name, last_name, id",
            clauses.where_sql()
        );
        fetch_all(self.db().conn(), &sql, clauses.into_params(), row_to_client).await
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM clients WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityKind::Client,
            id,
        })?;
        row_to_client(&row)
    }

    pub async fn create_client(&self, new: NewClient) -> Result<Client, DatabaseError> {
        new.validate()?;

        let sql = format!(
            "INSERT INTO clients (first_name, last_name, client_code, email, phone, \
             date_of_birth, initial_assessment_date, address1, address2, city, postcode, \
             emergency_contact_name, emergency_contact_relationship, emergency_contact_phone, \
             gp_name, gp_practice, gp_phone, status, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19) \
             RETURNING {SELECT_COLS}"
        );
        let params = vec![
            libsql::Value::Text(new.first_name.trim().to_string()),
            libsql::Value::Text(new.last_name.trim().to_string()),
            text_or_null(new.client_code.as_deref()),
            text_or_null(new.email.as_deref()),
            text_or_null(new.phone.as_deref()),
            date_or_null(new.date_of_birth),
            date_or_null(new.initial_assessment_date),
            text_or_null(new.address1.as_deref()),
            text_or_null(new.address2.as_deref()),
            text_or_null(new.city.as_deref()),
            text_or_null(new.postcode.as_deref()),
            text_or_null(new.emergency_contact_name.as_deref()),
            text_or_null(new.emergency_contact_relationship.as_deref()),
            text_or_null(new.emergency_contact_phone.as_deref()),
            text_or_null(new.gp_name.as_deref()),
            text_or_null(new.gp_practice.as_deref()),
            text_or_null(new.gp_phone.as_deref()),
            ClientStatus::Active.as_str().into(),
            Utc::now().to_rfc3339().into(),
        ];

        let client = fetch_optional(self.db().conn(), &sql, params, row_to_client)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        tracing::info!(client_id = client.id, "client created");
        Ok(client)
    }

    /// Apply the fields present in `update`. Stamps `updated_at`.
    pub async fn update_client(
        &self,
        id: i64,
        update: ClientUpdate,
    ) -> Result<Client, DatabaseError> {
        update.validate()?;

        let mut clauses = Clauses::new();
        if let Some(ref first_name) = update.first_name {
            clauses.push("first_name", "=", first_name.trim());
        }
        if let Some(ref last_name) = update.last_name {
            clauses.push("last_name", "=", last_name.trim());
        }
        set_text(&mut clauses, "client_code", update.client_code.as_ref());
        set_text(&mut clauses, "email", update.email.as_ref());
        set_text(&mut clauses, "phone", update.phone.as_ref());
        set_date(&mut clauses, "date_of_birth", update.date_of_birth.as_ref());
        set_date(
            &mut clauses,
            "initial_assessment_date",
            update.initial_assessment_date.as_ref(),
        );
        set_text(&mut clauses, "address1", update.address1.as_ref());
        set_text(&mut clauses, "address2", update.address2.as_ref());
        set_text(&mut clauses, "city", update.city.as_ref());
        set_text(&mut clauses, "postcode", update.postcode.as_ref());
        set_text(
            &mut clauses,
            "emergency_contact_name",
            update.emergency_contact_name.as_ref(),
        );
        set_text(
            &mut clauses,
            "emergency_contact_relationship",
            update.emergency_contact_relationship.as_ref(),
        );
        set_text(
            &mut clauses,
            "emergency_contact_phone",
            update.emergency_contact_phone.as_ref(),
        );
        set_text(&mut clauses, "gp_name", update.gp_name.as_ref());
        set_text(&mut clauses, "gp_practice", update.gp_practice.as_ref());
        set_text(&mut clauses, "gp_phone", update.gp_phone.as_ref());
        if let Some(status) = update.status {
            clauses.push("status", "=", status.as_str());
        }
        clauses.push("updated_at", "=", Utc::now().to_rfc3339());

        let id_idx = clauses.bind(id);
        let sql = format!(
            "UPDATE clients SET {} WHERE id = ?{id_idx} RETURNING {SELECT_COLS}",
            clauses.set_list()
        );
        let Some(client) =
            fetch_optional(self.db().conn(), &sql, clauses.into_params(), row_to_client).await?
        else {
            tracing::warn!(client_id = id, "client not found for update");
            return Err(DatabaseError::NotFound {
                entity: EntityKind::Client,
                id,
            });
        };
        tracing::info!(client_id = id, "client updated");
        Ok(client)
    }

    /// Archive (`true`) or reactivate (`false`) a client.
    pub async fn set_client_archived(
        &self,
        id: i64,
        archive: bool,
    ) -> Result<Client, DatabaseError> {
        let status = ClientStatus::from_archive_flag(archive);
        let sql = format!(
            "UPDATE clients SET status = ?1, updated_at = ?2 WHERE id = ?3 RETURNING {SELECT_COLS}"
        );
        let params = vec![
            status.as_str().into(),
            Utc::now().to_rfc3339().into(),
            id.into(),
        ];
        let Some(client) = fetch_optional(self.db().conn(), &sql, params, row_to_client).await?
        else {
            tracing::warn!(client_id = id, "client not found for archive");
            return Err(DatabaseError::NotFound {
                entity: EntityKind::Client,
                id,
            });
        };
        tracing::info!(client_id = id, %status, "client archive status set");
        Ok(client)
    }

    /// Delete a client and return the row as it was.
    ///
    /// Session and assessment notes go with it; supervision notes keep their
    /// row with `client_id` cleared.
    pub async fn delete_client(&self, id: i64) -> Result<Client, DatabaseError> {
        let sql = format!("DELETE FROM clients WHERE id = ?1 RETURNING {SELECT_COLS}");
        let Some(client) =
            fetch_optional(self.db().conn(), &sql, vec![id.into()], row_to_client).await?
        else {
            tracing::warn!(client_id = id, "client not found for deletion");
            return Err(DatabaseError::NotFound {
                entity: EntityKind::Client,
                id,
            });
        };
        tracing::info!(client_id = id, "client deleted");
        Ok(client)
    }

    /// A client with its session and assessment notes, newest first.
    ///
    /// `today` anchors the derived age.
    pub async fn get_client_with_notes(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<ClientWithNotes, DatabaseError> {
        let client = self.get_client(id).await?;
        let session_notes = self.list_session_notes(NoteFilter::for_client(id)).await?;
        let assessment_notes = self
            .list_assessment_notes(NoteFilter::for_client(id))
            .await?;
        Ok(ClientWithNotes {
            profile: ClientProfile::new(client, today),
            session_notes,
            assessment_notes,
        })
    }

    /// Reject a note whose `client_id` names no client.
    pub(crate) async fn ensure_client_exists(&self, client_id: i64) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM clients WHERE id = ?1", [client_id])
            .await?;
        if rows.next().await?.is_none() {
            return Err(CoreError::invalid(
                "client_id",
                format!("client {client_id} does not exist"),
            )
            .into());
        }
        Ok(())
    }
}
