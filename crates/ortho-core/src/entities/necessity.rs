use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UrgencyTier;

/// Composite treatment-necessity score for one patient profile. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NecessityScoreResult {
    /// 10-100, or 0 when no conditions were selected.
    pub total_score: u32,
    /// 0-35.
    pub timing_score: u32,
    /// 0-40.
    pub severity_score: u32,
    /// 0-35.
    pub risk_score: u32,
    pub prevention_bonus: f64,
    pub complexity_bonus: f64,
    pub interpretation: String,
    pub urgency: UrgencyTier,
    /// True when the neutral fallback replaced a failed computation.
    pub fallback: bool,
}
