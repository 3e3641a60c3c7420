//! Finding repository: extracted claims and their tier-weighted view.

use tracing::warn;

use ortho_core::entities::Finding;
use ortho_synth::WeightedFinding;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_real, opt_text, parse_enum, parse_optional_enum, to_u32};
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

const FINDING_COLUMNS: &str = "f.id, f.record_id, f.condition_id, f.kind, f.description, \
     f.effect_value, f.effect_direction, f.age_min, f.age_max, f.confidence_interval";

fn row_to_finding(row: &libsql::Row) -> Result<Finding, DatabaseError> {
    Ok(Finding {
        id: row.get::<i64>(0)?,
        record_id: row.get::<i64>(1)?,
        condition_id: row.get::<i64>(2)?,
        kind: parse_enum(&row.get::<String>(3)?)?,
        description: row.get::<String>(4)?,
        effect_value: row.get::<Option<f64>>(5)?,
        effect_direction: parse_enum(&row.get::<String>(6)?)?,
        age_min: to_u32(row.get::<i64>(7)?, "age_min")?,
        age_max: to_u32(row.get::<i64>(8)?, "age_max")?,
        confidence_interval: get_opt_string(row, 9)?,
    })
}

impl EvidenceService {
    /// List findings in id order, optionally for one condition.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_findings(
        &self,
        condition_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Finding>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {FINDING_COLUMNS} FROM findings f
                     WHERE ?1 IS NULL OR f.condition_id = ?1
                     ORDER BY f.id LIMIT ?2"
                ),
                libsql::params_from_iter(vec![
                    condition_id.map_or(libsql::Value::Null, libsql::Value::Integer),
                    libsql::Value::Integer(i64::from(limit)),
                ]),
            )
            .await?;
        let mut findings = Vec::new();
        while let Some(row) = rows.next().await? {
            findings.push(row_to_finding(&row)?);
        }
        Ok(findings)
    }

    /// Every finding joined with its record's evidence tier, in id order.
    ///
    /// A tier the store cannot parse is treated as unknown.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn weighted_findings(&self) -> Result<Vec<WeightedFinding>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {FINDING_COLUMNS}, r.evidence_tier
                     FROM findings f JOIN research_records r ON r.id = f.record_id
                     ORDER BY f.id"
                ),
                (),
            )
            .await?;
        let mut findings = Vec::new();
        while let Some(row) = rows.next().await? {
            let finding = row_to_finding(&row)?;
            let tier = parse_optional_enum(get_opt_string(&row, 10)?.as_deref())
                .inspect_err(|e| {
                    warn!(
                        finding = finding.id,
                        error = %e,
                        "unreadable evidence tier; weighting as unknown"
                    );
                })
                .unwrap_or(None);
            findings.push(WeightedFinding { finding, tier });
        }
        Ok(findings)
    }

    /// Insert the finding for a record unless it already has one. Returns
    /// whether a row was written.
    pub(crate) async fn insert_finding(
        uow: &UnitOfWork,
        finding: &Finding,
    ) -> Result<bool, DatabaseError> {
        let inserted = uow
            .execute(
                "INSERT OR IGNORE INTO findings (record_id, condition_id, kind, description,
                     effect_value, effect_direction, age_min, age_max, confidence_interval)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params_from_iter(vec![
                    libsql::Value::Integer(finding.record_id),
                    libsql::Value::Integer(finding.condition_id),
                    libsql::Value::Text(finding.kind.as_str().to_string()),
                    libsql::Value::Text(finding.description.clone()),
                    opt_real(finding.effect_value),
                    libsql::Value::Text(finding.effect_direction.as_str().to_string()),
                    libsql::Value::Integer(i64::from(finding.age_min)),
                    libsql::Value::Integer(i64::from(finding.age_max)),
                    opt_text(finding.confidence_interval.as_deref()),
                ]),
            )
            .await?;
        Ok(inserted > 0)
    }
}
