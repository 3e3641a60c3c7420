use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::provenance::Provenance;

/// Projected outcome with and without treatment over a fixed horizon.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FutureScenario {
    pub timeframe_years: u32,
    pub timeframe_label: String,
    pub age_min: u32,
    pub age_max: u32,
    pub with_treatment: String,
    pub without_treatment: String,
    pub provenance: Provenance,
    pub confidence: f64,
}

impl FutureScenario {
    #[must_use]
    pub const fn contains(&self, age: u32) -> bool {
        self.age_min <= age && age <= self.age_max
    }
}
