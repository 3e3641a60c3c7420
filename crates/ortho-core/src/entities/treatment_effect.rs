use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EffectCategory, EffectDirection};
use crate::provenance::Provenance;

/// Aggregated effect of treating one condition, per outcome category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TreatmentEffect {
    pub condition_id: i64,
    pub condition_name: String,
    pub effect_category: EffectCategory,
    pub effect_value: f64,
    pub effect_direction: EffectDirection,
    pub description: String,
    pub provenance: Provenance,
    pub confidence: f64,
}
