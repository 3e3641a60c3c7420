use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EvidenceTier, StudyType};

/// One bibliographic record. Immutable after import apart from DOI merges,
/// which only fill fields that were previously absent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchRecord {
    pub id: i64,
    pub pmid: Option<String>,
    pub title: String,
    pub authors: Option<String>,
    pub publication_year: Option<i32>,
    pub journal: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub abstract_text: Option<String>,
    pub keywords: Vec<String>,
    pub mesh_terms: Vec<String>,
    pub study_type: Option<StudyType>,
    pub evidence_tier: Option<EvidenceTier>,
    pub sample_size: Option<u32>,
    pub confidence_interval: Option<String>,
    pub target_age_group: Option<String>,
    pub imported_at: DateTime<Utc>,
}
