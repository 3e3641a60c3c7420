//! Timing benefit table.

use ortho_core::entities::TimingBenefit;

use crate::error::DatabaseError;
use crate::helpers::{parse_enum, parse_provenance, to_u32, written};
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

fn row_to_timing_benefit(row: &libsql::Row) -> Result<TimingBenefit, DatabaseError> {
    Ok(TimingBenefit {
        age_group: parse_enum(&row.get::<String>(0)?)?,
        age_min: to_u32(row.get::<i64>(1)?, "age_min")?,
        age_max: to_u32(row.get::<i64>(2)?, "age_max")?,
        label: row.get::<String>(3)?,
        benefit_text: row.get::<String>(4)?,
        recommendation: parse_enum(&row.get::<String>(5)?)?,
        timing_score: to_u32(row.get::<i64>(6)?, "timing_score")?,
        provenance: parse_provenance(&row.get::<String>(7)?)?,
        confidence: row.get::<f64>(8)?,
    })
}

impl EvidenceService {
    /// Timing benefits youngest first, optionally only those containing `age`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_timing_benefits(
        &self,
        age: Option<u32>,
    ) -> Result<Vec<TimingBenefit>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT age_group, age_min, age_max, label, benefit_text, recommendation,
                        timing_score, provenance, confidence
                 FROM timing_benefits
                 WHERE ?1 IS NULL OR (age_min <= ?1 AND ?1 <= age_max)
                 ORDER BY age_min",
                libsql::params_from_iter(vec![
                    age.map_or(libsql::Value::Null, |a| libsql::Value::Integer(i64::from(a))),
                ]),
            )
            .await?;
        let mut benefits = Vec::new();
        while let Some(row) = rows.next().await? {
            benefits.push(row_to_timing_benefit(&row)?);
        }
        Ok(benefits)
    }

    pub(crate) async fn replace_timing_benefits(
        uow: &UnitOfWork,
        benefits: &[TimingBenefit],
    ) -> Result<u32, DatabaseError> {
        uow.clear("timing_benefits").await?;
        for benefit in benefits {
            uow.execute(
                "INSERT INTO timing_benefits
                     (age_group, age_min, age_max, label, benefit_text, recommendation,
                      timing_score, provenance, confidence)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    benefit.age_group.as_str(),
                    i64::from(benefit.age_min),
                    i64::from(benefit.age_max),
                    benefit.label.as_str(),
                    benefit.benefit_text.as_str(),
                    benefit.recommendation.as_str(),
                    i64::from(benefit.timing_score),
                    benefit.provenance.to_column(),
                    benefit.confidence
                ],
            )
            .await?;
        }
        written(benefits.len())
    }
}
