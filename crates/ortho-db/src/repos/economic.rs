//! Economic impact table.

use ortho_core::entities::EconomicImpact;

use crate::error::DatabaseError;
use crate::helpers::{parse_enum, parse_provenance, to_u32, written};
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

fn row_to_economic_impact(row: &libsql::Row) -> Result<EconomicImpact, DatabaseError> {
    Ok(EconomicImpact {
        age_group: parse_enum(&row.get::<String>(0)?)?,
        age_min: to_u32(row.get::<i64>(1)?, "age_min")?,
        age_max: to_u32(row.get::<i64>(2)?, "age_max")?,
        label: row.get::<String>(3)?,
        current_cost: row.get::<i64>(4)?,
        future_savings: row.get::<i64>(5)?,
        roi: row.get::<f64>(6)?,
        calculation_basis: row.get::<String>(7)?,
        provenance: parse_provenance(&row.get::<String>(8)?)?,
        confidence: row.get::<f64>(9)?,
    })
}

impl EvidenceService {
    /// Economic impacts youngest cohort first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_economic_impacts(&self) -> Result<Vec<EconomicImpact>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT age_group, age_min, age_max, label, current_cost, future_savings, roi,
                        calculation_basis, provenance, confidence
                 FROM economic_impacts ORDER BY age_min",
                (),
            )
            .await?;
        let mut impacts = Vec::new();
        while let Some(row) = rows.next().await? {
            impacts.push(row_to_economic_impact(&row)?);
        }
        Ok(impacts)
    }

    pub(crate) async fn replace_economic_impacts(
        uow: &UnitOfWork,
        impacts: &[EconomicImpact],
    ) -> Result<u32, DatabaseError> {
        uow.clear("economic_impacts").await?;
        for impact in impacts {
            uow.execute(
                "INSERT INTO economic_impacts
                     (age_group, age_min, age_max, label, current_cost, future_savings, roi,
                      calculation_basis, provenance, confidence)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                libsql::params![
                    impact.age_group.as_str(),
                    i64::from(impact.age_min),
                    i64::from(impact.age_max),
                    impact.label.as_str(),
                    impact.current_cost,
                    impact.future_savings,
                    impact.roi,
                    impact.calculation_basis.as_str(),
                    impact.provenance.to_column(),
                    impact.confidence
                ],
            )
            .await?;
        }
        written(impacts.len())
    }
}
