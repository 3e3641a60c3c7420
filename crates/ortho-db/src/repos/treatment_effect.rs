//! Treatment effect table.

use ortho_core::entities::TreatmentEffect;

use crate::error::DatabaseError;
use crate::helpers::{parse_enum, parse_provenance, written};
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

fn row_to_treatment_effect(row: &libsql::Row) -> Result<TreatmentEffect, DatabaseError> {
    Ok(TreatmentEffect {
        condition_id: row.get::<i64>(0)?,
        condition_name: row.get::<String>(1)?,
        effect_category: parse_enum(&row.get::<String>(2)?)?,
        effect_value: row.get::<f64>(3)?,
        effect_direction: parse_enum(&row.get::<String>(4)?)?,
        description: row.get::<String>(5)?,
        provenance: parse_provenance(&row.get::<String>(6)?)?,
        confidence: row.get::<f64>(7)?,
    })
}

impl EvidenceService {
    /// Treatment effects ordered by condition, largest magnitude first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_treatment_effects(
        &self,
        condition_id: Option<i64>,
    ) -> Result<Vec<TreatmentEffect>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT e.condition_id, c.name_ja, e.effect_category, e.effect_value,
                        e.effect_direction, e.description, e.provenance, e.confidence
                 FROM treatment_effects e JOIN dental_conditions c ON c.id = e.condition_id
                 WHERE ?1 IS NULL OR e.condition_id = ?1
                 ORDER BY e.condition_id, e.effect_value DESC, e.effect_category",
                libsql::params_from_iter(vec![
                    condition_id.map_or(libsql::Value::Null, libsql::Value::Integer),
                ]),
            )
            .await?;
        let mut effects = Vec::new();
        while let Some(row) = rows.next().await? {
            effects.push(row_to_treatment_effect(&row)?);
        }
        Ok(effects)
    }

    pub(crate) async fn replace_treatment_effects(
        uow: &UnitOfWork,
        effects: &[TreatmentEffect],
    ) -> Result<u32, DatabaseError> {
        uow.clear("treatment_effects").await?;
        for effect in effects {
            uow.execute(
                "INSERT INTO treatment_effects
                     (condition_id, effect_category, effect_value, effect_direction,
                      description, provenance, confidence)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    effect.condition_id,
                    effect.effect_category.as_str(),
                    effect.effect_value,
                    effect.effect_direction.as_str(),
                    effect.description.as_str(),
                    effect.provenance.to_column(),
                    effect.confidence
                ],
            )
            .await?;
        }
        written(effects.len())
    }
}
