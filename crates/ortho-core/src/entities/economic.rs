use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AgeGroupCode;
use crate::provenance::Provenance;

/// Cost of treatment against projected lifetime savings for an age cohort.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EconomicImpact {
    pub age_group: AgeGroupCode,
    pub age_min: u32,
    pub age_max: u32,
    pub label: String,
    /// Yen.
    pub current_cost: i64,
    /// Yen.
    pub future_savings: i64,
    /// Percent.
    pub roi: f64,
    pub calculation_basis: String,
    pub provenance: Provenance,
    pub confidence: f64,
}

impl EconomicImpact {
    #[must_use]
    pub const fn contains(&self, age: u32) -> bool {
        self.age_min <= age && age <= self.age_max
    }
}

/// Patient-facing economic summary for a single age.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EconomicImpactView {
    pub current_cost: i64,
    pub future_savings: i64,
    pub net_benefit: i64,
    pub roi: f64,
    /// Savings spread over 30 years, per month.
    pub monthly_benefit: i64,
}
