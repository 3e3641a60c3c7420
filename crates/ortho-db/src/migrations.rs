//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` / `INSERT OR IGNORE` so
//! re-running is a no-op.

use crate::OrthoDb;
use crate::error::DatabaseError;

/// Initial schema: reference, literature and derived tables plus seeds.
pub(crate) const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Every table, children before parents.
pub(crate) const ALL_TABLES: [&str; 9] = [
    "economic_impacts",
    "future_scenarios",
    "timing_benefits",
    "treatment_effects",
    "age_risk_profiles",
    "findings",
    "research_records",
    "condition_keywords",
    "dental_conditions",
];

impl OrthoDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
