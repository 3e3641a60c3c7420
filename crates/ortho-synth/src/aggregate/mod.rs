//! Aggregation of findings into the five derived evidence tables.
//!
//! The engine is a pure function of an [`EvidenceSnapshot`]. Output rows are
//! produced in a stable order with sorted provenance, so two runs over the
//! same snapshot are identical.

mod economic;
mod effects;
mod risk;
mod scenarios;
mod timing;

pub use economic::{ECONOMIC_BUCKETS, economic_impacts, economic_view};
pub use effects::{CATEGORY_KEYWORDS, DEFAULT_EFFECTS, categorize, treatment_effects};
pub use risk::{RISK_THRESHOLDS, risk_profiles};
pub use scenarios::{
    SCENARIO_AGE_BUCKETS, SCENARIO_TIMEFRAMES, future_scenarios, scenario_confidence,
};
pub use timing::{TIMING_BUCKETS, timing_benefits, timing_confidence};

use serde::Serialize;
use tracing::debug;

use ortho_core::entities::{
    AgeRiskProfile, DentalCondition, EconomicImpact, Finding, FutureScenario, TimingBenefit,
    TreatmentEffect,
};
use ortho_core::enums::EvidenceTier;

use crate::weighting::tier_weight;

/// Upper bound for any evidence-derived confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Confidence attached to rows produced by a fixed fallback.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// A finding joined with the tier of the record it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedFinding {
    pub finding: Finding,
    pub tier: Option<EvidenceTier>,
}

impl WeightedFinding {
    #[must_use]
    pub const fn weight(&self) -> f64 {
        tier_weight(self.tier)
    }
}

/// Everything the engine reads: the reference conditions and every finding.
#[derive(Debug, Clone, Default)]
pub struct EvidenceSnapshot {
    pub conditions: Vec<DentalCondition>,
    pub findings: Vec<WeightedFinding>,
}

/// All five derived tables, in write order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SynthesisOutput {
    pub risk_profiles: Vec<AgeRiskProfile>,
    pub treatment_effects: Vec<TreatmentEffect>,
    pub timing_benefits: Vec<TimingBenefit>,
    pub future_scenarios: Vec<FutureScenario>,
    pub economic_impacts: Vec<EconomicImpact>,
}

/// Run every aggregation over `snapshot`.
#[must_use]
pub fn synthesize(snapshot: &EvidenceSnapshot) -> SynthesisOutput {
    let output = SynthesisOutput {
        risk_profiles: risk_profiles(&snapshot.findings),
        treatment_effects: treatment_effects(&snapshot.conditions, &snapshot.findings),
        timing_benefits: timing_benefits(&snapshot.findings),
        future_scenarios: future_scenarios(),
        economic_impacts: economic_impacts(),
    };
    debug!(
        findings = snapshot.findings.len(),
        conditions = snapshot.conditions.len(),
        risk_profiles = output.risk_profiles.len(),
        treatment_effects = output.treatment_effects.len(),
        "synthesized evidence tables"
    );
    output
}

/// `min(total_weight / count, 0.95)`, or 0 when there is nothing to divide.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn weighted_confidence(total_weight: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total_weight / count as f64).clamp(0.0, MAX_CONFIDENCE)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use ortho_core::entities::{DentalCondition, Finding};
    use ortho_core::enums::{EffectDirection, EvidenceTier, FindingKind};

    use super::WeightedFinding;

    pub fn condition(id: i64, code: &str, name_ja: &str, severity: u32) -> DentalCondition {
        DentalCondition {
            id,
            code: code.into(),
            name_ja: name_ja.into(),
            name_en: code.into(),
            severity_base_score: severity,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn finding(
        record_id: i64,
        condition_id: i64,
        description: &str,
        value: Option<f64>,
        direction: EffectDirection,
        ages: (u32, u32),
        tier: Option<EvidenceTier>,
    ) -> WeightedFinding {
        WeightedFinding {
            finding: Finding {
                id: record_id,
                record_id,
                condition_id,
                kind: FindingKind::Risk,
                description: description.into(),
                effect_value: value,
                effect_direction: direction,
                age_min: ages.0,
                age_max: ages.1,
                confidence_interval: None,
            },
            tier,
        }
    }
}
