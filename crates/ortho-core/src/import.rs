//! Import boundary: the loosely-typed record shape accepted from literature
//! exports (one JSON object per line).
//!
//! Everything except the title is optional. Fields left empty are filled by
//! the enrichment step before the record reaches the store.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder title for records exported without one.
pub const UNKNOWN_TITLE: &str = "不明";

/// A literature record as exported by a search tool or spreadsheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportRecord {
    #[serde(default)]
    pub pmid: Option<String>,
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "abstract", alias = "abstract_text")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub mesh_terms: Vec<String>,
    #[serde(default)]
    pub study_type: Option<String>,
    #[serde(default, alias = "evidence_tier")]
    pub evidence_level: Option<String>,
    #[serde(default)]
    pub sample_size: Option<LooseCount>,
    #[serde(default)]
    pub confidence_interval: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    /// Condition name (Japanese or English) or code.
    #[serde(default, alias = "issue")]
    pub condition: Option<String>,
    #[serde(default)]
    pub risk_description: Option<String>,
}

fn unknown_title() -> String {
    UNKNOWN_TITLE.to_string()
}

/// A count that spreadsheets export either as a number or as free text
/// (`"120"`, `"不明"`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum LooseCount {
    Number(u64),
    Text(String),
}

impl LooseCount {
    /// The count if it is a non-negative integer that fits in `u32`.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Number(n) => u32::try_from(*n).ok(),
            Self::Text(text) => {
                let text = text.trim();
                if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                    text.parse().ok()
                } else {
                    None
                }
            }
        }
    }
}

/// Treat empty and whitespace-only strings as missing.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
