//! Full reset: drop every table, re-run the schema, re-seed reference data.

use tracing::{info, warn};

use ortho_core::responses::ResetResponse;

use crate::error::DatabaseError;
use crate::migrations::{ALL_TABLES, MIGRATION_001};
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

impl EvidenceService {
    /// Drop all data and recreate the seeded schema in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any statement fails; the store is left as
    /// it was in that case.
    pub async fn reset(&self) -> Result<ResetResponse, DatabaseError> {
        warn!("resetting evidence store");
        let uow = self.begin("reset").await?;
        let result = reset_within(&uow).await;
        let conditions = uow.finish(result).await?;
        info!(conditions, "evidence store reset");
        Ok(ResetResponse {
            reset: true,
            conditions,
        })
    }
}

async fn reset_within(uow: &UnitOfWork) -> Result<u32, DatabaseError> {
    for table in ALL_TABLES {
        uow.execute(&format!("DROP TABLE IF EXISTS {table}"), ()).await?;
    }
    uow.execute_batch(MIGRATION_001)
        .await
        .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;

    let mut rows = uow.query("SELECT COUNT(*) FROM dental_conditions", ()).await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    crate::helpers::to_u32(row.get::<i64>(0)?, "conditions")
}
