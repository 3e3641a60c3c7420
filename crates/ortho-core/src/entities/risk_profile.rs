use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::provenance::Provenance;

/// Risk type recorded for every age threshold profile.
pub const RISK_TYPE_TOOTH_LOSS: &str = "tooth_loss";

/// Aggregated risk of leaving a malocclusion untreated past an age threshold.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AgeRiskProfile {
    pub age_threshold: u32,
    pub risk_type: String,
    /// Percentage in `[0, 100]`.
    pub risk_value: f64,
    pub description: String,
    pub provenance: Provenance,
    pub confidence: f64,
}
