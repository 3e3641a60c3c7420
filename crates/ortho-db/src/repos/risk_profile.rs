//! Age risk profile table.

use ortho_core::entities::AgeRiskProfile;

use crate::error::DatabaseError;
use crate::helpers::{parse_provenance, to_u32, written};
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

fn row_to_risk_profile(row: &libsql::Row) -> Result<AgeRiskProfile, DatabaseError> {
    Ok(AgeRiskProfile {
        age_threshold: to_u32(row.get::<i64>(0)?, "age_threshold")?,
        risk_type: row.get::<String>(1)?,
        risk_value: row.get::<f64>(2)?,
        description: row.get::<String>(3)?,
        provenance: parse_provenance(&row.get::<String>(4)?)?,
        confidence: row.get::<f64>(5)?,
    })
}

impl EvidenceService {
    /// Risk profiles ordered by threshold.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_risk_profiles(&self) -> Result<Vec<AgeRiskProfile>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT age_threshold, risk_type, risk_value, description, provenance, confidence
                 FROM age_risk_profiles ORDER BY age_threshold, risk_type",
                (),
            )
            .await?;
        let mut profiles = Vec::new();
        while let Some(row) = rows.next().await? {
            profiles.push(row_to_risk_profile(&row)?);
        }
        Ok(profiles)
    }

    pub(crate) async fn replace_risk_profiles(
        uow: &UnitOfWork,
        profiles: &[AgeRiskProfile],
    ) -> Result<u32, DatabaseError> {
        uow.clear("age_risk_profiles").await?;
        for profile in profiles {
            uow.execute(
                "INSERT INTO age_risk_profiles
                     (age_threshold, risk_type, risk_value, description, provenance, confidence)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    i64::from(profile.age_threshold),
                    profile.risk_type.as_str(),
                    profile.risk_value,
                    profile.description.as_str(),
                    profile.provenance.to_column(),
                    profile.confidence
                ],
            )
            .await?;
        }
        written(profiles.len())
    }
}
