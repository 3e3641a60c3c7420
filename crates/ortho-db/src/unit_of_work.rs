//! Explicit unit of work over a libSQL transaction.
//!
//! Callers begin a unit, run their writes against it, then hand the outcome
//! to [`UnitOfWork::finish`], which commits on `Ok` and rolls back on `Err`.
//! Nothing written through a unit is visible to other connections until the
//! commit.

use libsql::params::IntoParams;
use tracing::{debug, error};

use crate::error::DatabaseError;

pub struct UnitOfWork {
    tx: libsql::Transaction,
    label: &'static str,
}

impl UnitOfWork {
    /// Begin a transaction on `conn`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `BEGIN` fails (e.g. a transaction is
    /// already open on the connection).
    pub async fn begin(
        conn: &libsql::Connection,
        label: &'static str,
    ) -> Result<Self, DatabaseError> {
        let tx = conn.transaction().await?;
        debug!(unit = label, "unit of work started");
        Ok(Self { tx, label })
    }

    /// Execute one statement, returning the affected row count.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, DatabaseError> {
        Ok(self.tx.execute(sql, params).await?)
    }

    /// Run a query inside the transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the query fails.
    pub async fn query(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<libsql::Rows, DatabaseError> {
        Ok(self.tx.query(sql, params).await?)
    }

    /// Execute a batch of `;`-separated statements.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if any statement fails.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), DatabaseError> {
        self.tx.execute_batch(sql).await?;
        Ok(())
    }

    /// Delete every row of `table`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the delete fails.
    pub async fn clear(&self, table: &str) -> Result<u64, DatabaseError> {
        self.execute(&format!("DELETE FROM {table}"), ()).await
    }

    /// Row id of the most recent successful `INSERT` in this transaction.
    #[must_use]
    pub fn last_insert_rowid(&self) -> i64 {
        self.tx.last_insert_rowid()
    }

    /// Commit if `result` is `Ok`, otherwise roll back and return the error.
    ///
    /// # Errors
    ///
    /// Returns the original error after rollback, or `DatabaseError::LibSql`
    /// if the commit itself fails.
    pub async fn finish<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.tx.commit().await?;
                debug!(unit = self.label, "unit of work committed");
                Ok(value)
            }
            Err(e) => {
                error!(unit = self.label, error = %e, "unit of work failed; rolling back");
                if let Err(rollback) = self.tx.rollback().await {
                    error!(unit = self.label, error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::OrthoDb;

    use super::*;

    async fn scratch_db() -> OrthoDb {
        let db = OrthoDb::open_local(":memory:").await.unwrap();
        db.conn()
            .execute("CREATE TABLE scratch (id INTEGER PRIMARY KEY, value TEXT NOT NULL)", ())
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn ok_result_commits() {
        let db = scratch_db().await;
        let uow = UnitOfWork::begin(db.conn(), "test").await.unwrap();
        let result = uow
            .execute("INSERT INTO scratch (value) VALUES ('kept')", ())
            .await;
        let affected = uow.finish(result).await.unwrap();
        assert_eq!(affected, 1);
        assert_eq!(db.count("SELECT COUNT(*) FROM scratch").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn err_result_rolls_back() {
        let db = scratch_db().await;
        let uow = UnitOfWork::begin(db.conn(), "test").await.unwrap();
        uow.execute("INSERT INTO scratch (value) VALUES ('dropped')", ())
            .await
            .unwrap();
        let failed = uow.execute("INSERT INTO scratch (value) VALUES (NULL)", ()).await;
        assert!(failed.is_err());

        let err = uow.finish(failed).await.unwrap_err();
        assert!(matches!(err, DatabaseError::LibSql(_)));
        assert_eq!(db.count("SELECT COUNT(*) FROM scratch").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn last_insert_rowid_tracks_inserts() {
        let db = scratch_db().await;
        let uow = UnitOfWork::begin(db.conn(), "test").await.unwrap();
        uow.execute("INSERT INTO scratch (id, value) VALUES (41, 'a')", ())
            .await
            .unwrap();
        assert_eq!(uow.last_insert_rowid(), 41);
        uow.finish(Ok(())).await.unwrap();
    }
}
