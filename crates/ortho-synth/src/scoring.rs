//! Composite treatment-necessity score.
//!
//! The score adds three components (timing 0-35, severity 0-40, risk 0-35
//! before the multi-condition factor) and two age-dependent bonuses, then
//! clamps to `[10, 100]`.
//! Lookups against the derived tables are resolved into
//! [`NecessityInputs`] first so the arithmetic stays pure.

use std::collections::BTreeSet;

use ortho_core::entities::{AgeRiskProfile, DentalCondition, NecessityScoreResult, TimingBenefit};
use ortho_core::enums::UrgencyTier;

use crate::error::ScoringError;

pub const TIMING_MAX: f64 = 35.0;
pub const SEVERITY_MAX: f64 = 40.0;
pub const RISK_MAX: f64 = 35.0;

/// Ages the score is defined for.
pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 100;

const NO_SELECTION_TEXT: &str = "問題が選択されていないため、スコアを計算できません。";
const FALLBACK_TEXT: &str = "計算エラーが発生しました。";

/// Score bands from the top down: lower bound, interpretation, urgency.
pub const INTERPRETATIONS: [(f64, &str, UrgencyTier); 5] = [
    (
        85.0,
        "緊急性の高い矯正必要性。早急な対応が強く推奨されます。",
        UrgencyTier::Urgent,
    ),
    (
        70.0,
        "高い矯正必要性。できるだけ早い対応が望ましいです。",
        UrgencyTier::High,
    ),
    (
        50.0,
        "中程度の矯正必要性。計画的な対応を検討してください。",
        UrgencyTier::Moderate,
    ),
    (
        30.0,
        "低〜中程度の矯正必要性。定期的な経過観察をお勧めします。",
        UrgencyTier::LowModerate,
    ),
    (
        f64::NEG_INFINITY,
        "現時点での矯正必要性は低いですが、定期的な評価をお勧めします。",
        UrgencyTier::Minimal,
    ),
];

/// Everything the score needs, already looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct NecessityInputs {
    pub age: u32,
    /// Number of distinct conditions selected, known or not.
    pub selected: usize,
    /// Base severities of the selected conditions that exist.
    pub severities: Vec<u32>,
    /// Timing score of the cohort containing `age`, if any.
    pub cohort_timing_score: Option<u32>,
    /// Smallest risk threshold at or above `age` with its risk value.
    pub next_risk: Option<(u32, f64)>,
}

impl NecessityInputs {
    /// Resolve inputs from in-memory copies of the reference and derived
    /// tables.
    #[must_use]
    pub fn from_tables(
        age: u32,
        condition_ids: &[i64],
        conditions: &[DentalCondition],
        timing: &[TimingBenefit],
        risk_profiles: &[AgeRiskProfile],
    ) -> Self {
        let selected: BTreeSet<i64> = condition_ids.iter().copied().collect();
        let severities = conditions
            .iter()
            .filter(|condition| selected.contains(&condition.id))
            .map(|condition| condition.severity_base_score)
            .collect();
        let cohort_timing_score = timing
            .iter()
            .find(|benefit| benefit.contains(age))
            .map(|benefit| benefit.timing_score);
        let next_risk = risk_profiles
            .iter()
            .filter(|profile| profile.age_threshold >= age)
            .min_by_key(|profile| profile.age_threshold)
            .map(|profile| (profile.age_threshold, profile.risk_value));

        Self {
            age,
            selected: selected.len(),
            severities,
            cohort_timing_score,
            next_risk,
        }
    }
}

/// Timing component: the cohort's score scaled to 35, or an age ladder when
/// no cohort covers the age.
#[must_use]
pub fn timing_component(age: u32, cohort_timing_score: Option<u32>) -> f64 {
    if let Some(score) = cohort_timing_score {
        return f64::from(score) / 100.0 * TIMING_MAX;
    }
    match age {
        0..=12 => 35.0,
        13..=18 => 30.0,
        19..=25 => 25.0,
        26..=40 => 20.0,
        41..=60 => 15.0,
        _ => 10.0,
    }
}

/// Severity component: the most severe condition counts fully, the others
/// at half weight, capped at 40.
#[must_use]
pub fn severity_component(severities: &[u32]) -> f64 {
    let Some(&primary) = severities.iter().max() else {
        return 0.0;
    };
    if severities.len() == 1 {
        return f64::from(primary) / 100.0 * SEVERITY_MAX;
    }
    let mut sorted = severities.to_vec();
    sorted.sort_unstable();
    let secondary: f64 = sorted[..sorted.len() - 1]
        .iter()
        .map(|&score| f64::from(score))
        .sum::<f64>()
        * 0.5;
    ((f64::from(primary) + secondary) / 100.0 * SEVERITY_MAX).min(SEVERITY_MAX)
}

/// Risk component: urgency of the next threshold times its risk, scaled by
/// the number of selected conditions.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn risk_component(age: u32, next_risk: Option<(u32, f64)>, selected: usize) -> f64 {
    let Some((threshold, risk)) = next_risk else {
        return 0.0;
    };
    let years_until = f64::from(threshold.saturating_sub(age));
    let urgency = (1.0 - years_until / 15.0).max(0.0);
    let problem_factor = (selected.saturating_sub(1) as f64).mul_add(0.1, 1.0).min(1.5);
    urgency * (risk / 60.0) * problem_factor * RISK_MAX
}

/// Interpretation text and urgency for a clamped total.
#[must_use]
pub fn interpret(total: f64) -> (&'static str, UrgencyTier) {
    INTERPRETATIONS
        .iter()
        .find(|(lower_bound, _, _)| total >= *lower_bound)
        .map_or(
            (INTERPRETATIONS[4].1, UrgencyTier::Minimal),
            |(_, text, urgency)| (*text, *urgency),
        )
}

/// Result for an empty condition selection.
#[must_use]
pub fn no_selection() -> NecessityScoreResult {
    NecessityScoreResult {
        total_score: 0,
        timing_score: 0,
        severity_score: 0,
        risk_score: 0,
        prevention_bonus: 0.0,
        complexity_bonus: 0.0,
        interpretation: NO_SELECTION_TEXT.to_string(),
        urgency: UrgencyTier::Unknown,
        fallback: false,
    }
}

/// Neutral result reported when scoring fails.
#[must_use]
pub fn fallback() -> NecessityScoreResult {
    NecessityScoreResult {
        total_score: 50,
        timing_score: 20,
        severity_score: 20,
        risk_score: 10,
        prevention_bonus: 0.0,
        complexity_bonus: 0.0,
        interpretation: FALLBACK_TEXT.to_string(),
        urgency: UrgencyTier::Unknown,
        fallback: true,
    }
}

/// Compute the necessity score.
///
/// # Errors
///
/// Returns `ScoringError` when the age is outside `1..=100`, when the stored
/// risk value is not a percentage, or when any component is not finite.
#[allow(clippy::cast_precision_loss)]
pub fn necessity_score(inputs: &NecessityInputs) -> Result<NecessityScoreResult, ScoringError> {
    if inputs.selected == 0 {
        return Ok(no_selection());
    }
    if !(MIN_AGE..=MAX_AGE).contains(&inputs.age) {
        return Err(ScoringError::AgeOutOfRange(inputs.age));
    }
    if let Some((_, risk)) = inputs.next_risk {
        if !(0.0..=100.0).contains(&risk) {
            return Err(ScoringError::InvalidRisk(risk));
        }
    }

    let age = inputs.age;
    let timing = finite("timing", timing_component(age, inputs.cohort_timing_score))?;
    let severity = finite("severity", severity_component(&inputs.severities))?;
    let risk = finite("risk", risk_component(age, inputs.next_risk, inputs.selected))?;

    let prevention_bonus = if age <= 18 {
        f64::from(18 - age) * 0.5
    } else {
        0.0
    };
    let complexity_bonus = if (35..=55).contains(&age) && inputs.selected >= 2 {
        (inputs.selected - 1) as f64 * 2.0
    } else {
        0.0
    };

    let total = finite(
        "total",
        (timing + severity + risk + prevention_bonus + complexity_bonus).clamp(10.0, 100.0),
    )?;
    let (interpretation, urgency) = interpret(total);

    Ok(NecessityScoreResult {
        total_score: to_points(total),
        timing_score: to_points(timing),
        severity_score: to_points(severity),
        risk_score: to_points(risk),
        prevention_bonus,
        complexity_bonus,
        interpretation: interpretation.to_string(),
        urgency,
        fallback: false,
    })
}

fn finite(component: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFinite { component })
    }
}

/// Half-to-even rounding of a non-negative, finite component.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_points(value: f64) -> u32 {
    value.round_ties_even().max(0.0) as u32
}
