//! Service layer over the practice database.
//!
//! `PracticeService` wraps `CasenoteDb` (raw database access). All repo
//! methods are implemented as `impl PracticeService` blocks under `repos/`.
//!
//! Every mutation is one `INSERT`/`UPDATE`/`DELETE ... RETURNING` statement,
//! so each is atomic on the shared connection without an explicit transaction.

use crate::CasenoteDb;
use crate::error::DatabaseError;

pub struct PracticeService {
    db: CasenoteDb,
}

impl PracticeService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = CasenoteDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `CasenoteDb`.
    #[must_use]
    pub const fn from_db(db: CasenoteDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CasenoteDb {
        &self.db
    }

    /// Cheap connectivity probe used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database does not answer.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        let mut rows = self.db.conn().query("SELECT 1", ()).await?;
        rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(())
    }
}
