use ortho_core::entities::TimingBenefit;
use ortho_core::enums::{AgeGroupCode, RecommendationTier};
use ortho_core::provenance::Provenance;

use super::{MAX_CONFIDENCE, WeightedFinding};

/// Confidence of a bucket that no finding overlaps.
pub const NO_EVIDENCE_TIMING_CONFIDENCE: f64 = 0.7;

/// Fixed timing narrative, recommendation and score per age cohort.
pub const TIMING_BUCKETS: [(AgeGroupCode, &str, RecommendationTier, u32); 5] = [
    (
        AgeGroupCode::Pediatric,
        "骨格の成長を利用した効率的な矯正が可能。将来的な歯列問題を95%予防可能。治療期間が30%短縮。",
        RecommendationTier::Optimal,
        100,
    ),
    (
        AgeGroupCode::Adolescent,
        "顎の成長がまだ続いており、比較的効率的な矯正が可能。将来的な歯列問題を75%予防可能。",
        RecommendationTier::Recommended,
        80,
    ),
    (
        AgeGroupCode::YoungAdult,
        "歯の移動は可能だが、治療期間が長くなる傾向。将来的な歯列問題を60%予防可能。",
        RecommendationTier::Suitable,
        60,
    ),
    (
        AgeGroupCode::Adult,
        "歯周組織の状態によっては制限あり。治療期間が50%延長。将来的な歯列問題を40%予防可能。",
        RecommendationTier::Conditional,
        40,
    ),
    (
        AgeGroupCode::Elderly,
        "歯周病や骨粗鬆症などの影響で治療オプションが制限される可能性。治療期間が2倍に延長。",
        RecommendationTier::SpecialistReview,
        20,
    ),
];

/// Confidence from the number of findings overlapping a bucket.
///
/// One or more findings give `0.5 + n / 20`, capped at 0.95. A bucket with no
/// overlapping finding reports 0.7, which is higher than one to four findings
/// would earn.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn timing_confidence(overlapping: usize) -> f64 {
    if overlapping == 0 {
        NO_EVIDENCE_TIMING_CONFIDENCE
    } else {
        (0.5 + overlapping as f64 / 20.0).min(MAX_CONFIDENCE)
    }
}

/// One timing benefit per cohort, youngest first.
#[must_use]
pub fn timing_benefits(findings: &[WeightedFinding]) -> Vec<TimingBenefit> {
    TIMING_BUCKETS
        .into_iter()
        .map(|(group, text, recommendation, score)| {
            let (age_min, age_max) = group.age_range();
            let overlapping: Vec<&WeightedFinding> = findings
                .iter()
                .filter(|wf| wf.finding.overlaps(age_min, age_max))
                .collect();
            TimingBenefit {
                age_group: group,
                age_min,
                age_max,
                label: group.label_ja().to_string(),
                benefit_text: text.to_string(),
                recommendation,
                timing_score: score,
                provenance: Provenance::from_records(
                    overlapping.iter().map(|wf| wf.finding.record_id),
                ),
                confidence: timing_confidence(overlapping.len()),
            }
        })
        .collect()
}
