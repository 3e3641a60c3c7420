//! Free-text signal extraction.
//!
//! Every extractor here is total: a pattern miss yields `None` (or the
//! documented default), never an error. Keyword tables are ordered and the
//! first matching row wins.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use ortho_core::enums::{AgeBand, EffectDirection, EvidenceTier, StudyType};

use crate::error::ExtractionError;

/// Condition code assigned when no keyword matches.
pub const OTHER_CONDITION_CODE: &str = "other";

/// Japanese terms that mark an effect as an increase, matched as substrings.
/// Increase terms and words are checked before the decrease ones.
pub const INCREASE_TERMS: &[&str] = &["上昇", "増加", "高まる", "倍"];

/// Japanese terms that mark an effect as a decrease.
pub const DECREASE_TERMS: &[&str] = &["低下", "減少", "改善"];

/// Study-design keywords over lowercased `title + abstract`, strongest first.
pub const STUDY_TYPE_KEYWORDS: &[(StudyType, &[&str])] = &[
    (
        StudyType::MetaAnalysis,
        &["meta-analysis", "systematic review", "meta analysis"],
    ),
    (
        StudyType::RandomizedControlledTrial,
        &["randomized controlled trial", "rct", "randomised"],
    ),
    (
        StudyType::CohortStudy,
        &["cohort", "prospective study", "longitudinal study", "follow-up study"],
    ),
    (StudyType::CaseControl, &["case-control", "case control"]),
    (StudyType::CrossSectional, &["cross-sectional", "prevalence study"]),
    (StudyType::CaseReport, &["case report", "case series"]),
    (StudyType::ClinicalTrial, &["clinical trial", "intervention study"]),
    (
        StudyType::ExperimentalStudy,
        &["in vitro", "laboratory", "experimental study"],
    ),
];

/// Condition codes and the English terms that identify them in literature.
pub const CONDITION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "crowding",
        &["crowding", "dental crowding", "malocclusion", "tooth crowding"],
    ),
    (
        "open_bite",
        &["open bite", "anterior open bite", "open occlusion"],
    ),
    ("deep_bite", &["deep bite", "overbite", "deep overbite"]),
    (
        "crossbite",
        &["crossbite", "cross bite", "cross-bite", "posterior crossbite"],
    ),
    (
        "maxillary_protrusion",
        &[
            "overjet",
            "maxillary protrusion",
            "class ii malocclusion",
            "maxillary prognathism",
        ],
    ),
    (
        "mandibular_protrusion",
        &[
            "underbite",
            "mandibular prognathism",
            "class iii malocclusion",
            "mandibular protrusion",
        ],
    ),
];

const CHILD_TERMS: &[&str] = &[
    "children",
    "child",
    "pediatric",
    "paediatric",
    "young",
    "deciduous dentition",
    "mixed dentition",
    "primary dentition",
];
const ADOLESCENT_TERMS: &[&str] = &[
    "adolescent",
    "adolescence",
    "teenager",
    "young adult",
    "young people",
];
const ADULT_TERMS: &[&str] = &["adult", "middle-aged", "middle aged"];
const ELDERLY_TERMS: &[&str] = &[
    "elderly",
    "older adult",
    "geriatric",
    "older people",
    "senior",
];

/// Title truncation length for fallback risk descriptions, in characters.
const TITLE_SUMMARY_CHARS: usize = 100;
/// Characters of abstract kept on each side of a risk statement.
const RISK_CONTEXT_CHARS: usize = 50;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

static PERCENT_VALUE: LazyLock<Regex> = LazyLock::new(|| compile(r"([0-9]+\.?[0-9]*)%"));
static FOLD_VALUE: LazyLock<Regex> = LazyLock::new(|| compile(r"([0-9]+\.?[0-9]*)倍"));

/// English increase words, on word boundaries so "comprised" is not a rise.
static INCREASE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\b(?:increase[sd]?|increasing|higher|elevated|rise[sn]?|rising)\b|-fold\b")
});
static DECREASE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)\b(?:decrease[sd]?|decreasing|decline[sd]?|declining|reduced|improve[sd]?|improvements?|improving)\b",
    )
});

static SAMPLE_SIZE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:total of|included|enrolled|analyzed|comprising|consisted of|sample of|n\s*=\s*)(\d+)(?:\s+(?:patients|subjects|participants|children|adults|individuals))",
        r"(?i)(\d+)(?:\s+(?:patients|subjects|participants|children|adults|individuals))(?:\s+were\s+(?:included|enrolled|studied))",
        r"(?i)sample(?:\s+size)?(?:\s+of)?(?:\s+was)?(?:\s+were)?\s*(?::|was|=)\s*(\d+)",
        r"(?i)(?:a|the)\s+(?:total\s+)?(?:of\s+)?(\d+)\s+(?:patients|subjects|participants|children|adults|individuals)",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

static CONFIDENCE_INTERVAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:95%\s+CI|95%\s+confidence\s+interval)(?:\s+of)?(?:\s+was)?(?:\s+:)?\s*(?:\[|\()?(\d+\.?\d*)[^\d]+(\d+\.?\d*)(?:\]|\))",
        r"(?i)(?:\[|\()(\d+\.?\d*)[^\d]+(\d+\.?\d*)(?:\]|\))(?:\s+95%\s+CI)",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// Age patterns over lowercased abstracts. Two capture groups describe a
/// range; one group is a mean age.
static AGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"age(?:d|s)?\s+(?:between|from|of|range)?\s*(\d+)(?:\s*-\s*|\s+to\s+)(\d+)(?:\s+years)?",
        r"(\d+)(?:\s*-\s*|\s+to\s+)(\d+)(?:\s+years?\s+old|\s+years?\s+of\s+age)",
        r"mean\s+age\s+(?:of|was|=)\s+(\d+\.?\d*)",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

static RISK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+\.?\d*)%\s+(?:increase|higher|greater|elevated)\s+risk",
        r"(?i)risk\s+(?:increased|higher|greater|elevated)\s+by\s+(\d+\.?\d*)%",
        r"(?i)odds\s+ratio\s+(?:of|was|=)\s+(\d+\.?\d*)",
        r"(?i)(?:relative|absolute)\s+risk\s+(?:of|was|=)\s+(\d+\.?\d*)",
        r"(?i)hazard\s+ratio\s+(?:of|was|=)\s+(\d+\.?\d*)",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

// ---------------------------------------------------------------------------
// Effect signals
// ---------------------------------------------------------------------------

/// Quantitative signal read from a risk or effect description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectSignal {
    pub value: Option<f64>,
    pub direction: EffectDirection,
}

/// Read value and direction from a description.
#[must_use]
pub fn extract_signal(text: &str) -> EffectSignal {
    EffectSignal {
        value: extract_effect_value(text),
        direction: extract_direction(text),
    }
}

/// First `<n>%` as `n`; otherwise first `<n>倍` as the percent change
/// `|n × 100 − 100|`; otherwise `None`. Full-width digits, `．` and `％`
/// read as their ASCII forms.
///
/// The value is a magnitude only. A multiplier below 1 (`0.5倍`, risk
/// halved) yields 50, and because `倍` is an increase term the finding is
/// tagged as an increase: the direction is inverted for such multipliers.
#[must_use]
pub fn extract_effect_value(text: &str) -> Option<f64> {
    let text = to_ascii_digits(text);
    if let Some(value) = first_number(&PERCENT_VALUE, &text) {
        return Some(value);
    }
    first_number(&FOLD_VALUE, &text).map(|multiplier| multiplier.mul_add(100.0, -100.0).abs())
}

fn to_ascii_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| matches!(c, '０'..='９' | '．' | '％')) {
        return Cow::Borrowed(text);
    }
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from_digit(u32::from(c) - u32::from('０'), 10).unwrap_or(c),
            '．' => '.',
            '％' => '%',
            other => other,
        })
        .collect::<String>()
        .into()
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Increase terms win over decrease terms; neither yields `Neutral`.
#[must_use]
pub fn extract_direction(text: &str) -> EffectDirection {
    if INCREASE_TERMS.iter().any(|term| text.contains(term)) || INCREASE_WORDS.is_match(text) {
        EffectDirection::Increase
    } else if DECREASE_TERMS.iter().any(|term| text.contains(term))
        || DECREASE_WORDS.is_match(text)
    {
        EffectDirection::Decrease
    } else {
        EffectDirection::Neutral
    }
}

// ---------------------------------------------------------------------------
// Age bands
// ---------------------------------------------------------------------------

/// Match an age descriptor against the Japanese labels and snake_case codes.
#[must_use]
pub fn parse_age_band(descriptor: &str) -> Option<AgeBand> {
    let descriptor = descriptor.trim();
    AgeBand::ALL.into_iter().find(|band| {
        band.label_ja() == descriptor || band.as_str().eq_ignore_ascii_case(descriptor)
    })
}

/// Inclusive age range for a descriptor. Missing or unrecognised text
/// applies to all ages.
#[must_use]
pub fn age_range(descriptor: Option<&str>) -> (u32, u32) {
    descriptor
        .and_then(parse_age_band)
        .unwrap_or(AgeBand::AllAges)
        .age_range()
}

/// Infer the studied population from an abstract.
///
/// Explicit numeric ranges and mean ages (taken as ±5 years) decide first;
/// population keywords second; anything else covers all ages.
#[must_use]
pub fn determine_age_group(abstract_text: Option<&str>) -> AgeBand {
    let Some(abstract_text) = abstract_text.filter(|text| !text.trim().is_empty()) else {
        return AgeBand::AllAges;
    };
    let lowered = abstract_text.to_lowercase();

    if let Some((min_age, max_age)) = numeric_age_bounds(&lowered) {
        return if min_age < 13.0 && max_age < 18.0 {
            AgeBand::Pediatric
        } else if min_age < 18.0 && max_age < 25.0 {
            AgeBand::PediatricAdolescent
        } else if min_age >= 18.0 && max_age < 60.0 {
            AgeBand::Adult
        } else if min_age >= 40.0 {
            AgeBand::AdultElderly
        } else {
            AgeBand::AllAges
        };
    }

    let mentions = |terms: &[&str]| terms.iter().any(|term| lowered.contains(term));
    if mentions(CHILD_TERMS) {
        if mentions(ADOLESCENT_TERMS) {
            AgeBand::PediatricAdolescent
        } else {
            AgeBand::Pediatric
        }
    } else if mentions(ADOLESCENT_TERMS) {
        AgeBand::Adolescent
    } else if mentions(ADULT_TERMS) {
        if mentions(ELDERLY_TERMS) {
            AgeBand::AdultElderly
        } else {
            AgeBand::Adult
        }
    } else if mentions(ELDERLY_TERMS) {
        AgeBand::Elderly
    } else {
        AgeBand::AllAges
    }
}

fn numeric_age_bounds(lowered: &str) -> Option<(f64, f64)> {
    let mut min_age = 100.0_f64;
    let mut max_age = 0.0_f64;

    for pattern in AGE_PATTERNS.iter() {
        for caps in pattern.captures_iter(lowered) {
            let first = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
            let second = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
            match (first, second) {
                (Some(a), Some(b)) => {
                    min_age = min_age.min(a).min(b);
                    max_age = max_age.max(a).max(b);
                }
                (Some(mean), None) if caps.len() == 2 => {
                    min_age = min_age.min(mean - 5.0);
                    max_age = max_age.max(mean + 5.0);
                }
                _ => {}
            }
        }
    }

    (min_age < 100.0 && max_age > 0.0).then_some((min_age, max_age))
}

// ---------------------------------------------------------------------------
// Study design
// ---------------------------------------------------------------------------

/// Classify the study design from its title and abstract.
#[must_use]
pub fn determine_study_type(title: &str, abstract_text: Option<&str>) -> StudyType {
    let text = format!("{title} {}", abstract_text.unwrap_or_default()).to_lowercase();
    STUDY_TYPE_KEYWORDS
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| text.contains(term)))
        .map_or(StudyType::Unspecified, |(study_type, _)| *study_type)
}

/// Parse a study-type label as exported (`cohort-study`, `meta-analysis`, ...).
///
/// # Errors
///
/// Returns `ExtractionError::UnknownStudyType` for labels outside the fixed set.
pub fn parse_study_type(raw: &str) -> Result<StudyType, ExtractionError> {
    let needle = raw.trim().to_lowercase().replace('_', "-");
    STUDY_TYPE_KEYWORDS
        .iter()
        .map(|(study_type, _)| *study_type)
        .chain(std::iter::once(StudyType::Unspecified))
        .find(|study_type| study_type.as_str() == needle)
        .ok_or_else(|| ExtractionError::UnknownStudyType(raw.to_string()))
}

/// Parse an evidence tier code.
///
/// # Errors
///
/// Returns `ExtractionError::UnknownTier` for codes outside `1a..5`.
pub fn parse_tier(raw: &str) -> Result<EvidenceTier, ExtractionError> {
    EvidenceTier::parse(raw).ok_or_else(|| ExtractionError::UnknownTier(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Sample size and confidence interval
// ---------------------------------------------------------------------------

/// Participant count stated in an abstract.
#[must_use]
pub fn extract_sample_size(abstract_text: &str) -> Option<u32> {
    SAMPLE_SIZE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(abstract_text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    })
}

/// 95% confidence interval stated in an abstract, as `95% CI: <lo>-<hi>`.
#[must_use]
pub fn extract_confidence_interval(abstract_text: &str) -> Option<String> {
    CONFIDENCE_INTERVAL_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(abstract_text)?;
        let lower = caps.get(1)?.as_str();
        let upper = caps.get(2)?.as_str();
        Some(format!("95% CI: {lower}-{upper}"))
    })
}

// ---------------------------------------------------------------------------
// Risk description and condition
// ---------------------------------------------------------------------------

/// Summarise the headline risk statement of a record.
///
/// The first matching risk pattern becomes `<v>%上昇 (<context>...)`. Without
/// a match the title stands in, truncated to 100 characters.
#[must_use]
pub fn extract_risk_description(title: &str, abstract_text: Option<&str>) -> String {
    let Some(abstract_text) = abstract_text.filter(|text| !text.is_empty()) else {
        return title.to_string();
    };

    for pattern in RISK_PATTERNS.iter() {
        let Some(caps) = pattern.captures(abstract_text) else {
            continue;
        };
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Ok(value) = number.as_str().parse::<f64>() else {
            continue;
        };
        let context = char_window(abstract_text, whole.start(), whole.end(), RISK_CONTEXT_CHARS);
        return format!("{value:.1}%上昇 ({}...)", context.trim());
    }

    if title.chars().count() > TITLE_SUMMARY_CHARS {
        let head: String = title.chars().take(TITLE_SUMMARY_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

/// Characters of `text` around the byte span `[start, end)`, widened by
/// `margin` characters on each side.
fn char_window(text: &str, start: usize, end: usize, margin: usize) -> String {
    let start_char = text[..start].chars().count();
    let end_char = start_char + text[start..end].chars().count();
    let from = start_char.saturating_sub(margin);
    text.chars().skip(from).take(end_char + margin - from).collect()
}

/// Condition code for free text (title, abstract, keywords, MeSH terms).
#[must_use]
pub fn classify_condition(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    CONDITION_KEYWORDS
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| lowered.contains(term)))
        .map_or(OTHER_CONDITION_CODE, |(code, _)| code)
}
