//! Gap filling for imported literature records.
//!
//! Values the export already carries are kept; anything empty is derived from
//! the title and abstract with the extractors in [`crate::extract`].

use serde::Serialize;
use tracing::warn;

use ortho_core::enums::{EvidenceTier, StudyType};
use ortho_core::import::{ImportRecord, non_empty};

use crate::extract::{
    classify_condition, determine_age_group, determine_study_type, extract_confidence_interval,
    extract_risk_description, extract_sample_size, parse_study_type, parse_tier,
};

/// Fully populated metadata for one imported record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrichment {
    pub study_type: StudyType,
    pub evidence_tier: EvidenceTier,
    pub sample_size: Option<u32>,
    pub confidence_interval: Option<String>,
    /// Age descriptor (Japanese label) used to derive the finding's age range.
    pub target_age_group: String,
    pub risk_description: String,
    /// Condition named by the export, if any. Resolved against the reference
    /// table by the store.
    pub condition_hint: Option<String>,
    /// Condition code classified from the record text.
    pub classified_condition: &'static str,
}

/// Derive missing metadata for `record`.
#[must_use]
pub fn enrich(record: &ImportRecord) -> Enrichment {
    let abstract_text = non_empty(record.abstract_text.as_deref());

    let study_type = non_empty(record.study_type.as_deref())
        .and_then(|raw| {
            parse_study_type(raw)
                .inspect_err(|error| warn!(title = %record.title, %error, "inferring study type"))
                .ok()
        })
        .unwrap_or_else(|| determine_study_type(&record.title, abstract_text));

    let evidence_tier = non_empty(record.evidence_level.as_deref())
        .and_then(|raw| {
            parse_tier(raw)
                .inspect_err(|error| {
                    warn!(title = %record.title, %error, "deriving tier from study type");
                })
                .ok()
        })
        .unwrap_or_else(|| study_type.evidence_tier());

    let sample_size = record
        .sample_size
        .as_ref()
        .and_then(ortho_core::import::LooseCount::value)
        .or_else(|| abstract_text.and_then(extract_sample_size));

    let confidence_interval = non_empty(record.confidence_interval.as_deref())
        .map(str::to_string)
        .or_else(|| abstract_text.and_then(extract_confidence_interval));

    let target_age_group = non_empty(record.age_group.as_deref()).map_or_else(
        || determine_age_group(abstract_text).label_ja().to_string(),
        str::to_string,
    );

    let risk_description = non_empty(record.risk_description.as_deref()).map_or_else(
        || extract_risk_description(&record.title, abstract_text),
        str::to_string,
    );

    let classification_text = [
        record.title.as_str(),
        abstract_text.unwrap_or_default(),
        record.keywords.join(" ").as_str(),
        record.mesh_terms.join(" ").as_str(),
    ]
    .join(" ");

    Enrichment {
        study_type,
        evidence_tier,
        sample_size,
        confidence_interval,
        target_age_group,
        risk_description,
        condition_hint: non_empty(record.condition.as_deref()).map(str::to_string),
        classified_condition: classify_condition(&classification_text),
    }
}
