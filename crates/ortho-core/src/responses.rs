//! Response types returned as JSON by `ortho` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response from `ortho import`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportSummary {
    /// Lines read from the input.
    pub read: u32,
    /// New research records inserted.
    pub imported: u32,
    /// Records whose DOI already existed and were merged instead.
    pub merged: u32,
    /// Findings extracted and inserted.
    pub findings: u32,
}

/// Response from `ortho regenerate`: row counts per derived table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RegenerateSummary {
    pub risk_profiles: u32,
    pub treatment_effects: u32,
    pub timing_benefits: u32,
    pub future_scenarios: u32,
    pub economic_impacts: u32,
}

/// Response from `ortho reset`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResetResponse {
    pub reset: bool,
    pub conditions: u32,
}
