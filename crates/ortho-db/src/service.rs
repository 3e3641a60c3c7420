//! Service layer over the record store.
//!
//! `EvidenceService` wraps `OrthoDb` (raw database access). All repository,
//! import, synthesis, scoring and reset methods are implemented as
//! `impl EvidenceService` blocks in their own modules. The handle is passed
//! explicitly; there is no global connection.

use crate::OrthoDb;
use crate::error::DatabaseError;
use crate::unit_of_work::UnitOfWork;

pub struct EvidenceService {
    db: OrthoDb,
}

impl EvidenceService {
    /// Open (and migrate) a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = OrthoDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &OrthoDb {
        &self.db
    }

    /// Start a named unit of work on the service connection.
    pub(crate) async fn begin(&self, label: &'static str) -> Result<UnitOfWork, DatabaseError> {
        UnitOfWork::begin(self.db.conn(), label).await
    }
}
