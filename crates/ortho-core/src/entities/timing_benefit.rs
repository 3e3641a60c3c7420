use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AgeGroupCode, RecommendationTier};
use crate::provenance::Provenance;

/// Benefit of starting treatment within an age cohort.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TimingBenefit {
    pub age_group: AgeGroupCode,
    pub age_min: u32,
    pub age_max: u32,
    pub label: String,
    pub benefit_text: String,
    pub recommendation: RecommendationTier,
    /// Timing suitability in `[0, 100]`.
    pub timing_score: u32,
    pub provenance: Provenance,
    pub confidence: f64,
}

impl TimingBenefit {
    #[must_use]
    pub const fn contains(&self, age: u32) -> bool {
        self.age_min <= age && age <= self.age_max
    }
}
