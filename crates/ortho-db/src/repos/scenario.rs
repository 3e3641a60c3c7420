//! Future scenario table.

use ortho_core::entities::FutureScenario;

use crate::error::DatabaseError;
use crate::helpers::{parse_provenance, to_u32, written};
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

fn row_to_scenario(row: &libsql::Row) -> Result<FutureScenario, DatabaseError> {
    Ok(FutureScenario {
        timeframe_years: to_u32(row.get::<i64>(0)?, "timeframe_years")?,
        timeframe_label: row.get::<String>(1)?,
        age_min: to_u32(row.get::<i64>(2)?, "age_min")?,
        age_max: to_u32(row.get::<i64>(3)?, "age_max")?,
        with_treatment: row.get::<String>(4)?,
        without_treatment: row.get::<String>(5)?,
        provenance: parse_provenance(&row.get::<String>(6)?)?,
        confidence: row.get::<f64>(7)?,
    })
}

impl EvidenceService {
    /// Future scenarios ordered by horizon then age, optionally only those
    /// whose age bucket contains `age`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_future_scenarios(
        &self,
        age: Option<u32>,
    ) -> Result<Vec<FutureScenario>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT timeframe_years, timeframe_label, age_min, age_max, with_treatment,
                        without_treatment, provenance, confidence
                 FROM future_scenarios
                 WHERE ?1 IS NULL OR (age_min <= ?1 AND ?1 <= age_max)
                 ORDER BY timeframe_years, age_min",
                libsql::params_from_iter(vec![
                    age.map_or(libsql::Value::Null, |a| libsql::Value::Integer(i64::from(a))),
                ]),
            )
            .await?;
        let mut scenarios = Vec::new();
        while let Some(row) = rows.next().await? {
            scenarios.push(row_to_scenario(&row)?);
        }
        Ok(scenarios)
    }

    pub(crate) async fn replace_future_scenarios(
        uow: &UnitOfWork,
        scenarios: &[FutureScenario],
    ) -> Result<u32, DatabaseError> {
        uow.clear("future_scenarios").await?;
        for scenario in scenarios {
            uow.execute(
                "INSERT INTO future_scenarios
                     (timeframe_years, age_min, age_max, timeframe_label, with_treatment,
                      without_treatment, provenance, confidence)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    i64::from(scenario.timeframe_years),
                    i64::from(scenario.age_min),
                    i64::from(scenario.age_max),
                    scenario.timeframe_label.as_str(),
                    scenario.with_treatment.as_str(),
                    scenario.without_treatment.as_str(),
                    scenario.provenance.to_column(),
                    scenario.confidence
                ],
            )
            .await?;
        }
        written(scenarios.len())
    }
}
