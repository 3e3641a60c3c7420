use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EffectDirection, FindingKind};

/// One extracted quantitative claim, tied to one record and one condition.
///
/// `effect_value` is an unsigned magnitude; the sign lives in `effect_direction`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Finding {
    pub id: i64,
    pub record_id: i64,
    pub condition_id: i64,
    pub kind: FindingKind,
    pub description: String,
    pub effect_value: Option<f64>,
    pub effect_direction: EffectDirection,
    pub age_min: u32,
    pub age_max: u32,
    pub confidence_interval: Option<String>,
}

impl Finding {
    /// Whether the finding's applicable ages intersect `[min, max]`.
    #[must_use]
    pub const fn overlaps(&self, min: u32, max: u32) -> bool {
        self.age_min <= max && self.age_max >= min
    }
}
