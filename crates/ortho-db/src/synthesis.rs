//! Synthesis runs: snapshot the findings, aggregate, replace derived tables.
//!
//! A run reads and writes inside one unit of work. Tables are replaced in
//! the fixed order risk, effects, timing, scenarios, economic; a failure in
//! any of them rolls back all five.

use tracing::{debug, info};

use ortho_core::responses::RegenerateSummary;
use ortho_synth::{EvidenceSnapshot, SynthesisOutput, synthesize};

use crate::error::DatabaseError;
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

impl EvidenceService {
    /// Reference conditions and tier-weighted findings as the engine sees them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either read fails.
    pub async fn evidence_snapshot(&self) -> Result<EvidenceSnapshot, DatabaseError> {
        Ok(EvidenceSnapshot {
            conditions: self.conditions_by_id().await?,
            findings: self.weighted_findings().await?,
        })
    }

    /// Recompute and replace all five derived tables atomically.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any read or write fails; the previous
    /// tables are left untouched in that case.
    pub async fn regenerate_all(&self) -> Result<RegenerateSummary, DatabaseError> {
        let uow = self.begin("regenerate").await?;
        let result = self.regenerate_within(&uow).await;
        let summary = uow.finish(result).await?;
        info!(
            risk_profiles = summary.risk_profiles,
            treatment_effects = summary.treatment_effects,
            timing_benefits = summary.timing_benefits,
            future_scenarios = summary.future_scenarios,
            economic_impacts = summary.economic_impacts,
            "derived tables regenerated"
        );
        Ok(summary)
    }

    async fn regenerate_within(
        &self,
        uow: &UnitOfWork,
    ) -> Result<RegenerateSummary, DatabaseError> {
        let snapshot = self.evidence_snapshot().await?;
        let output = synthesize(&snapshot);
        write_output(uow, &output).await
    }
}

async fn write_output(
    uow: &UnitOfWork,
    output: &SynthesisOutput,
) -> Result<RegenerateSummary, DatabaseError> {
    let risk_profiles = EvidenceService::replace_risk_profiles(uow, &output.risk_profiles).await?;
    debug!(rows = risk_profiles, "age_risk_profiles replaced");
    let treatment_effects =
        EvidenceService::replace_treatment_effects(uow, &output.treatment_effects).await?;
    debug!(rows = treatment_effects, "treatment_effects replaced");
    let timing_benefits =
        EvidenceService::replace_timing_benefits(uow, &output.timing_benefits).await?;
    debug!(rows = timing_benefits, "timing_benefits replaced");
    let future_scenarios =
        EvidenceService::replace_future_scenarios(uow, &output.future_scenarios).await?;
    debug!(rows = future_scenarios, "future_scenarios replaced");
    let economic_impacts =
        EvidenceService::replace_economic_impacts(uow, &output.economic_impacts).await?;
    debug!(rows = economic_impacts, "economic_impacts replaced");

    Ok(RegenerateSummary {
        risk_profiles,
        treatment_effects,
        timing_benefits,
        future_scenarios,
        economic_impacts,
    })
}
