//! # ortho-db
//!
//! libSQL record store for orthodontic evidence synthesis.
//!
//! Holds the literature records, extracted findings, the seeded reference
//! conditions and the five derived evidence tables. Derived tables are only
//! ever written by a synthesis run inside a single [`unit_of_work::UnitOfWork`];
//! import and reset are likewise atomic.
//!
//! Uses the `libsql` crate (v0.9.29) in local embedded mode.

pub mod error;
pub mod helpers;
pub mod import;
mod migrations;
pub mod repos;
pub mod reset;
pub mod scoring;
pub mod service;
pub mod synthesis;
pub mod unit_of_work;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and its single connection.
pub struct OrthoDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl OrthoDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Must be set per connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let ortho_db = Self { db, conn };
        ortho_db.run_migrations().await?;
        Ok(ortho_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a `SELECT COUNT(*)`-style query and return the count.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn count(&self, sql: &str) -> Result<u32, DatabaseError> {
        let mut rows = self.conn.query(sql, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        helpers::to_u32(row.get::<i64>(0)?, "count")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> OrthoDb {
        OrthoDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "dental_conditions",
            "condition_keywords",
            "research_records",
            "findings",
            "age_risk_profiles",
            "treatment_effects",
            "timing_benefits",
            "future_scenarios",
            "economic_impacts",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn reference_conditions_are_seeded() {
        let db = test_db().await;
        assert_eq!(
            db.count("SELECT COUNT(*) FROM dental_conditions").await.unwrap(),
            7
        );
        assert!(db.count("SELECT COUNT(*) FROM condition_keywords").await.unwrap() > 7);
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        assert_eq!(
            db.count("SELECT COUNT(*) FROM dental_conditions").await.unwrap(),
            7
        );
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO findings (record_id, condition_id, description, effect_direction, age_min, age_max)
                 VALUES (999, 1, 'orphan', 'neutral', 1, 100)",
                (),
            )
            .await;
        assert!(result.is_err(), "finding without a record should be rejected");
    }

    #[tokio::test]
    async fn derived_tables_reject_out_of_range_risk() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO age_risk_profiles (age_threshold, risk_type, risk_value, description, provenance, confidence)
                 VALUES (12, 'tooth_loss', 140.0, 'x', 'default', 0.5)",
                (),
            )
            .await;
        assert!(result.is_err());
    }
}
