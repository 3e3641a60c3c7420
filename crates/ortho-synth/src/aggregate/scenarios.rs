use ortho_core::entities::FutureScenario;
use ortho_core::provenance::Provenance;

use crate::narrative::{ScenarioBand, with_treatment, without_treatment};

/// Projection horizons in years with their labels.
pub const SCENARIO_TIMEFRAMES: [(u32, &str); 3] = [(5, "5年後"), (10, "10年後"), (20, "20年後")];

/// Inclusive age buckets that scenarios are written for.
pub const SCENARIO_AGE_BUCKETS: [(u32, u32); 3] = [(7, 18), (19, 40), (41, 100)];

/// `0.8 − years / 50`. Not clamped: a 40-year horizon reaches 0.
#[must_use]
pub fn scenario_confidence(years: u32) -> f64 {
    0.8 - f64::from(years) / 50.0
}

/// Every timeframe crossed with every age bucket, by timeframe then age.
#[must_use]
pub fn future_scenarios() -> Vec<FutureScenario> {
    SCENARIO_TIMEFRAMES
        .into_iter()
        .flat_map(|(years, label)| {
            SCENARIO_AGE_BUCKETS
                .into_iter()
                .map(move |(age_min, age_max)| {
                    let band = ScenarioBand::for_age_min(age_min);
                    FutureScenario {
                        timeframe_years: years,
                        timeframe_label: label.to_string(),
                        age_min,
                        age_max,
                        with_treatment: with_treatment(years, band),
                        without_treatment: without_treatment(years, band),
                        provenance: Provenance::Default,
                        confidence: scenario_confidence(years),
                    }
                })
        })
        .collect()
}
