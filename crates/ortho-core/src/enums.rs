//! Ordered vocabularies for evidence synthesis.
//!
//! Most enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for SQL storage. Enums that partition a fixed domain
//! (tiers, categories, age buckets) expose an `ALL` constant in declared order,
//! which is also the evaluation order wherever "first match wins".

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EvidenceTier
// ---------------------------------------------------------------------------

/// Literature-quality classification, strongest (`1a`) to weakest (`5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EvidenceTier {
    #[serde(rename = "1a")]
    Tier1a,
    #[serde(rename = "1b")]
    Tier1b,
    #[serde(rename = "2a")]
    Tier2a,
    #[serde(rename = "2b")]
    Tier2b,
    #[serde(rename = "3")]
    Tier3,
    #[serde(rename = "4")]
    Tier4,
    #[serde(rename = "5")]
    Tier5,
}

impl EvidenceTier {
    pub const ALL: [Self; 7] = [
        Self::Tier1a,
        Self::Tier1b,
        Self::Tier2a,
        Self::Tier2b,
        Self::Tier3,
        Self::Tier4,
        Self::Tier5,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tier1a => "1a",
            Self::Tier1b => "1b",
            Self::Tier2a => "2a",
            Self::Tier2b => "2b",
            Self::Tier3 => "3",
            Self::Tier4 => "4",
            Self::Tier5 => "5",
        }
    }

    /// Parse a stored tier code. Returns `None` for anything outside the fixed set.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(raw))
    }

    /// Japanese description used in evidence badges.
    #[must_use]
    pub const fn label_ja(self) -> &'static str {
        match self {
            Self::Tier1a => "メタ分析/システマティックレビュー",
            Self::Tier1b => "ランダム化比較試験",
            Self::Tier2a => "コホート研究",
            Self::Tier2b => "症例対照研究/臨床試験",
            Self::Tier3 => "横断研究/実験研究",
            Self::Tier4 => "症例報告/症例シリーズ",
            Self::Tier5 => "専門家意見/不明",
        }
    }
}

impl fmt::Display for EvidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StudyType
// ---------------------------------------------------------------------------

/// Study design inferred from a record's title and abstract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StudyType {
    MetaAnalysis,
    RandomizedControlledTrial,
    CohortStudy,
    CaseControl,
    CrossSectional,
    CaseReport,
    ClinicalTrial,
    ExperimentalStudy,
    #[serde(rename = "unspecified-study")]
    Unspecified,
}

impl StudyType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MetaAnalysis => "meta-analysis",
            Self::RandomizedControlledTrial => "randomized-controlled-trial",
            Self::CohortStudy => "cohort-study",
            Self::CaseControl => "case-control",
            Self::CrossSectional => "cross-sectional",
            Self::CaseReport => "case-report",
            Self::ClinicalTrial => "clinical-trial",
            Self::ExperimentalStudy => "experimental-study",
            Self::Unspecified => "unspecified-study",
        }
    }

    /// Evidence tier implied by the study design.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn evidence_tier(self) -> EvidenceTier {
        match self {
            Self::MetaAnalysis => EvidenceTier::Tier1a,
            Self::RandomizedControlledTrial => EvidenceTier::Tier1b,
            Self::CohortStudy => EvidenceTier::Tier2a,
            Self::CaseControl | Self::ClinicalTrial => EvidenceTier::Tier2b,
            Self::CrossSectional | Self::ExperimentalStudy => EvidenceTier::Tier3,
            Self::CaseReport => EvidenceTier::Tier4,
            Self::Unspecified => EvidenceTier::Tier5,
        }
    }
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EffectDirection
// ---------------------------------------------------------------------------

/// Direction of a quantitative effect. Magnitudes are always stored unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EffectDirection {
    Increase,
    Decrease,
    Neutral,
}

impl EffectDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EffectDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EffectCategory
// ---------------------------------------------------------------------------

/// Clinical outcome a treatment effect is reported against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EffectCategory {
    CariesRisk,
    PeriodontalRisk,
    TmjRisk,
    Mastication,
    Aesthetic,
    Pronunciation,
    TraumaRisk,
    Other,
}

impl EffectCategory {
    pub const ALL: [Self; 8] = [
        Self::CariesRisk,
        Self::PeriodontalRisk,
        Self::TmjRisk,
        Self::Mastication,
        Self::Aesthetic,
        Self::Pronunciation,
        Self::TraumaRisk,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CariesRisk => "caries_risk",
            Self::PeriodontalRisk => "periodontal_risk",
            Self::TmjRisk => "tmj_risk",
            Self::Mastication => "mastication",
            Self::Aesthetic => "aesthetic",
            Self::Pronunciation => "pronunciation",
            Self::TraumaRisk => "trauma_risk",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EffectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FindingKind
// ---------------------------------------------------------------------------

/// Kind of extracted claim. Only risk findings are produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Risk,
}

impl FindingKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Risk => "risk",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AgeBand
// ---------------------------------------------------------------------------

/// Target-population descriptor attached to literature records.
///
/// Each band resolves to an inclusive `(min, max)` age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Pediatric,
    PediatricAdolescent,
    Adolescent,
    AdolescentAdult,
    Adult,
    AdultElderly,
    Elderly,
    AllAges,
}

impl AgeBand {
    pub const ALL: [Self; 8] = [
        Self::Pediatric,
        Self::PediatricAdolescent,
        Self::Adolescent,
        Self::AdolescentAdult,
        Self::Adult,
        Self::AdultElderly,
        Self::Elderly,
        Self::AllAges,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pediatric => "pediatric",
            Self::PediatricAdolescent => "pediatric_adolescent",
            Self::Adolescent => "adolescent",
            Self::AdolescentAdult => "adolescent_adult",
            Self::Adult => "adult",
            Self::AdultElderly => "adult_elderly",
            Self::Elderly => "elderly",
            Self::AllAges => "all_ages",
        }
    }

    /// Label as it appears in imported literature tables.
    #[must_use]
    pub const fn label_ja(self) -> &'static str {
        match self {
            Self::Pediatric => "小児",
            Self::PediatricAdolescent => "小児・青年",
            Self::Adolescent => "青年",
            Self::AdolescentAdult => "青年・成人",
            Self::Adult => "成人",
            Self::AdultElderly => "成人・高齢者",
            Self::Elderly => "高齢者",
            Self::AllAges => "全年齢",
        }
    }

    /// Inclusive applicable age range.
    #[must_use]
    pub const fn age_range(self) -> (u32, u32) {
        match self {
            Self::Pediatric => (3, 12),
            Self::PediatricAdolescent => (3, 18),
            Self::Adolescent => (13, 18),
            Self::AdolescentAdult => (13, 59),
            Self::Adult => (19, 59),
            Self::AdultElderly => (19, 100),
            Self::Elderly => (60, 100),
            Self::AllAges => (1, 100),
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_ja())
    }
}

// ---------------------------------------------------------------------------
// AgeGroupCode
// ---------------------------------------------------------------------------

/// Treatment-timing cohort used by timing benefits and economic impacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroupCode {
    Pediatric,
    Adolescent,
    YoungAdult,
    Adult,
    Elderly,
}

impl AgeGroupCode {
    pub const ALL: [Self; 5] = [
        Self::Pediatric,
        Self::Adolescent,
        Self::YoungAdult,
        Self::Adult,
        Self::Elderly,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pediatric => "pediatric",
            Self::Adolescent => "adolescent",
            Self::YoungAdult => "young_adult",
            Self::Adult => "adult",
            Self::Elderly => "elderly",
        }
    }

    #[must_use]
    pub const fn label_ja(self) -> &'static str {
        match self {
            Self::Pediatric => "小児期 (7-12歳)",
            Self::Adolescent => "青年期 (13-18歳)",
            Self::YoungAdult => "成人期前半 (19-35歳)",
            Self::Adult => "成人期後半 (36-60歳)",
            Self::Elderly => "高齢期 (61歳以上)",
        }
    }

    /// Inclusive age range of the cohort.
    #[must_use]
    pub const fn age_range(self) -> (u32, u32) {
        match self {
            Self::Pediatric => (7, 12),
            Self::Adolescent => (13, 18),
            Self::YoungAdult => (19, 35),
            Self::Adult => (36, 60),
            Self::Elderly => (61, 100),
        }
    }
}

impl fmt::Display for AgeGroupCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecommendationTier
// ---------------------------------------------------------------------------

/// Ordinal treatment-timing recommendation, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Optimal,
    Recommended,
    Suitable,
    Conditional,
    SpecialistReview,
}

impl RecommendationTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Recommended => "recommended",
            Self::Suitable => "suitable",
            Self::Conditional => "conditional",
            Self::SpecialistReview => "specialist_review",
        }
    }

    #[must_use]
    pub const fn label_ja(self) -> &'static str {
        match self {
            Self::Optimal => "最適",
            Self::Recommended => "推奨",
            Self::Suitable => "適応",
            Self::Conditional => "条件付き推奨",
            Self::SpecialistReview => "専門医評価必須",
        }
    }

    /// Ordinal rank, 5 for the strongest recommendation down to 1.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Optimal => 5,
            Self::Recommended => 4,
            Self::Suitable => 3,
            Self::Conditional => 2,
            Self::SpecialistReview => 1,
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UrgencyTier
// ---------------------------------------------------------------------------

/// Urgency attached to a necessity score interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Urgent,
    High,
    Moderate,
    LowModerate,
    Minimal,
    Unknown,
}

impl UrgencyTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::LowModerate => "low_moderate",
            Self::Minimal => "minimal",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub const fn label_ja(self) -> &'static str {
        match self {
            Self::Urgent => "緊急",
            Self::High => "高",
            Self::Moderate => "中",
            Self::LowModerate => "低",
            Self::Minimal => "最小",
            Self::Unknown => "不明",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parse_accepts_fixed_set_only() {
        for tier in EvidenceTier::ALL {
            assert_eq!(EvidenceTier::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(EvidenceTier::parse(" 1A "), Some(EvidenceTier::Tier1a));
        assert_eq!(EvidenceTier::parse("6"), None);
        assert_eq!(EvidenceTier::parse(""), None);
    }

    #[test]
    fn study_type_serializes_with_storage_names() {
        for study in [
            StudyType::MetaAnalysis,
            StudyType::RandomizedControlledTrial,
            StudyType::Unspecified,
        ] {
            let json = serde_json::to_string(&study).unwrap();
            assert_eq!(json, format!("\"{}\"", study.as_str()));
        }
    }

    #[test]
    fn age_group_codes_tile_their_ranges_in_order() {
        let mut previous_max = 6;
        for code in AgeGroupCode::ALL {
            let (min, max) = code.age_range();
            assert_eq!(min, previous_max + 1, "{code} should start after the previous bucket");
            previous_max = max;
        }
        assert_eq!(previous_max, 100);
    }

    #[test]
    fn recommendation_rank_is_strictly_decreasing() {
        let tiers = [
            RecommendationTier::Optimal,
            RecommendationTier::Recommended,
            RecommendationTier::Suitable,
            RecommendationTier::Conditional,
            RecommendationTier::SpecialistReview,
        ];
        assert!(tiers.windows(2).all(|pair| pair[0].rank() > pair[1].rank()));
    }
}
