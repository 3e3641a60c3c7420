//! Store-backed scoring calls.
//!
//! `calculate_necessity` never fails: a store read error or a scoring error
//! is logged and answered with the neutral fallback result.

use tracing::error;

use ortho_core::entities::{EconomicImpactView, NecessityScoreResult};
use ortho_synth::aggregate::economic_view;
use ortho_synth::scoring::{NecessityInputs, fallback, necessity_score, no_selection};

use crate::error::DatabaseError;
use crate::service::EvidenceService;

impl EvidenceService {
    /// Necessity score for a patient of `age` with the given conditions.
    pub async fn calculate_necessity(
        &self,
        age: u32,
        condition_ids: &[i64],
    ) -> NecessityScoreResult {
        if condition_ids.is_empty() {
            return no_selection();
        }
        match self.try_necessity(age, condition_ids).await {
            Ok(result) => result,
            Err(e) => {
                error!(
                    age,
                    conditions = ?condition_ids,
                    error = %e,
                    "necessity scoring failed; using fallback"
                );
                fallback()
            }
        }
    }

    async fn try_necessity(
        &self,
        age: u32,
        condition_ids: &[i64],
    ) -> Result<NecessityScoreResult, DatabaseError> {
        let conditions = self.conditions_by_id().await?;
        let timing = self.list_timing_benefits(None).await?;
        let risk_profiles = self.list_risk_profiles().await?;
        let inputs =
            NecessityInputs::from_tables(age, condition_ids, &conditions, &timing, &risk_profiles);
        necessity_score(&inputs).map_err(|e| DatabaseError::Other(e.into()))
    }

    /// Economic summary for `age`. Falls back to the fixed mid-range view
    /// when no cohort contains the age or the table cannot be read.
    pub async fn economic_impact(&self, age: u32) -> EconomicImpactView {
        let impacts = self.list_economic_impacts().await.unwrap_or_else(|e| {
            error!(age, error = %e, "economic impact read failed; using fallback");
            Vec::new()
        });
        economic_view(&impacts, age)
    }
}
