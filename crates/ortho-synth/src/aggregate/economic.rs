use ortho_core::entities::{EconomicImpact, EconomicImpactView};
use ortho_core::enums::AgeGroupCode;
use ortho_core::provenance::Provenance;

/// Treatment cost (yen) and lifetime savings multiplier per cohort.
pub const ECONOMIC_BUCKETS: [(AgeGroupCode, i64, f64); 5] = [
    (AgeGroupCode::Pediatric, 300_000, 5.0),
    (AgeGroupCode::Adolescent, 350_000, 3.5),
    (AgeGroupCode::YoungAdult, 400_000, 2.25),
    (AgeGroupCode::Adult, 450_000, 1.3),
    (AgeGroupCode::Elderly, 500_000, 0.6),
];

pub const ECONOMIC_CONFIDENCE: f64 = 0.7;
pub const CALCULATION_BASIS: &str = "医療費削減推計";

/// Months over which savings are spread for the monthly figure.
const BENEFIT_MONTHS: i64 = 30 * 12;

/// View returned when no cohort contains the requested age.
pub const FALLBACK_VIEW: EconomicImpactView = EconomicImpactView {
    current_cost: 400_000,
    future_savings: 900_000,
    net_benefit: 500_000,
    roi: 125.0,
    monthly_benefit: 2500,
};

/// Cost, savings and ROI per cohort, youngest first.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn economic_impacts() -> Vec<EconomicImpact> {
    ECONOMIC_BUCKETS
        .into_iter()
        .map(|(group, cost, multiplier)| {
            let (age_min, age_max) = group.age_range();
            let savings = cost as f64 * multiplier;
            EconomicImpact {
                age_group: group,
                age_min,
                age_max,
                label: group.label_ja().to_string(),
                current_cost: cost,
                future_savings: savings.trunc() as i64,
                roi: (savings - cost as f64) / cost as f64 * 100.0,
                calculation_basis: CALCULATION_BASIS.to_string(),
                provenance: Provenance::Default,
                confidence: ECONOMIC_CONFIDENCE,
            }
        })
        .collect()
}

/// Economic summary for `age` from the stored cohorts.
#[must_use]
pub fn economic_view(impacts: &[EconomicImpact], age: u32) -> EconomicImpactView {
    impacts
        .iter()
        .find(|impact| impact.contains(age))
        .map_or(FALLBACK_VIEW, |impact| EconomicImpactView {
            current_cost: impact.current_cost,
            future_savings: impact.future_savings,
            net_benefit: impact.future_savings - impact.current_cost,
            roi: impact.roi,
            monthly_benefit: impact.future_savings / BENEFIT_MONTHS,
        })
}
