//! # cn-db
//!
//! libSQL database operations for Casenote.
//!
//! Holds the practice's relational state: clients and their session,
//! assessment, supervision, and CPD notes. Repositories live in [`repos`] as
//! `impl PracticeService` blocks; report aggregation lives in
//! [`repos::report`].
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local-only mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;

/// Database handle for all Casenote state.
///
/// Wraps a libSQL database and a single connection shared by every caller.
/// `libsql::Connection` is cheap to clone and safe to use from many tasks.
pub struct CasenoteDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CasenoteDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Creates the parent directory of a file path if needed and runs
    /// migrations on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        DatabaseError::Migration(format!(
                            "create directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let casenote_db = Self { db, conn };
        casenote_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(casenote_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
