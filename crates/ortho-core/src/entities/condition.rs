use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference malocclusion with its base severity (0-100).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DentalCondition {
    pub id: i64,
    pub code: String,
    pub name_ja: String,
    pub name_en: String,
    pub severity_base_score: u32,
}
