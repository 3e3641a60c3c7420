use std::collections::BTreeMap;

use tracing::info;

use ortho_core::entities::{DentalCondition, TreatmentEffect};
use ortho_core::enums::{EffectCategory, EffectDirection};
use ortho_core::provenance::Provenance;

use super::{DEFAULT_CONFIDENCE, WeightedFinding, weighted_confidence};
use crate::extract::OTHER_CONDITION_CODE;
use crate::narrative::describe_effect;

/// Description keywords per outcome category. Matched case-insensitively in
/// order; a description matching nothing falls into `other`.
pub const CATEGORY_KEYWORDS: &[(EffectCategory, &[&str])] = &[
    (EffectCategory::CariesRisk, &["齲蝕", "むし歯", "虫歯", "caries"]),
    (EffectCategory::PeriodontalRisk, &["歯周病", "歯周炎", "periodontal"]),
    (EffectCategory::TmjRisk, &["顎関節症", "tmj", "temporomandibular"]),
    (EffectCategory::Mastication, &["咀嚼", "咬合", "chewing", "mastication"]),
    (EffectCategory::Aesthetic, &["審美", "見た目", "aesthetic", "appearance"]),
    (EffectCategory::Pronunciation, &["発音", "構音", "speech", "pronunciation"]),
    (EffectCategory::TraumaRisk, &["外傷", "trauma"]),
];

/// Effects assumed for a condition no literature covers, keyed by condition
/// code. All are reductions achieved by treatment.
pub const DEFAULT_EFFECTS: &[(&str, &[(EffectCategory, f64)])] = &[
    (
        "crowding",
        &[(EffectCategory::CariesRisk, 38.0), (EffectCategory::PeriodontalRisk, 45.0)],
    ),
    (
        "open_bite",
        &[(EffectCategory::CariesRisk, 58.0), (EffectCategory::Pronunciation, 90.0)],
    ),
    (
        "deep_bite",
        &[(EffectCategory::TraumaRisk, 65.0), (EffectCategory::TmjRisk, 55.0)],
    ),
    (
        "crossbite",
        &[(EffectCategory::TmjRisk, 85.0), (EffectCategory::Mastication, 40.0)],
    ),
    (
        "maxillary_protrusion",
        &[(EffectCategory::TraumaRisk, 75.0), (EffectCategory::Aesthetic, 80.0)],
    ),
    (
        "mandibular_protrusion",
        &[(EffectCategory::Mastication, 70.0), (EffectCategory::Pronunciation, 30.0)],
    ),
    (
        OTHER_CONDITION_CODE,
        &[(EffectCategory::CariesRisk, 30.0), (EffectCategory::PeriodontalRisk, 25.0)],
    ),
];

/// Outcome category of a finding description.
#[must_use]
pub fn categorize(description: &str) -> EffectCategory {
    let lowered = description.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map_or(EffectCategory::Other, |(category, _)| *category)
}

/// Per-condition, per-category treatment effects, conditions in the order
/// given and categories in declaration order.
#[must_use]
pub fn treatment_effects(
    conditions: &[DentalCondition],
    findings: &[WeightedFinding],
) -> Vec<TreatmentEffect> {
    let mut effects = Vec::new();
    for condition in conditions {
        let own: Vec<&WeightedFinding> = findings
            .iter()
            .filter(|wf| wf.finding.condition_id == condition.id)
            .collect();

        if own.is_empty() {
            info!(condition = %condition.code, "no findings; using default effects");
            effects.extend(default_effects(condition));
            continue;
        }

        let mut by_category: BTreeMap<EffectCategory, Vec<&WeightedFinding>> = BTreeMap::new();
        for wf in own {
            by_category
                .entry(categorize(&wf.finding.description))
                .or_default()
                .push(wf);
        }

        effects.extend(
            by_category
                .into_iter()
                .filter_map(|(category, members)| {
                    aggregate_category(condition, category, &members)
                }),
        );
    }
    effects
}

fn aggregate_category(
    condition: &DentalCondition,
    category: EffectCategory,
    members: &[&WeightedFinding],
) -> Option<TreatmentEffect> {
    let mut total_weight = 0.0;
    let mut weighted_effect = 0.0;
    let mut decreases = 0_usize;
    let mut increases = 0_usize;
    let mut records = Vec::new();

    for wf in members {
        let Some(value) = wf.finding.effect_value else {
            continue;
        };
        let weight = wf.weight();
        match wf.finding.effect_direction {
            EffectDirection::Decrease => {
                weighted_effect += value * weight;
                decreases += 1;
            }
            EffectDirection::Increase => {
                weighted_effect -= value * weight;
                increases += 1;
            }
            EffectDirection::Neutral => {}
        }
        total_weight += weight;
        records.push(wf.finding.record_id);
    }

    if total_weight <= 0.0 {
        return None;
    }

    let direction = if decreases > increases {
        EffectDirection::Decrease
    } else {
        EffectDirection::Increase
    };
    let magnitude = (weighted_effect / total_weight).abs();

    Some(TreatmentEffect {
        condition_id: condition.id,
        condition_name: condition.name_ja.clone(),
        effect_category: category,
        effect_value: magnitude,
        effect_direction: direction,
        description: describe_effect(&condition.name_ja, category, magnitude, direction),
        provenance: Provenance::from_records(records),
        confidence: weighted_confidence(total_weight, members.len()),
    })
}

fn default_effects(condition: &DentalCondition) -> Vec<TreatmentEffect> {
    let rows = DEFAULT_EFFECTS
        .iter()
        .find(|(code, _)| *code == condition.code)
        .or_else(|| DEFAULT_EFFECTS.iter().find(|(code, _)| *code == OTHER_CONDITION_CODE))
        .map_or(&[][..], |(_, rows)| *rows);

    rows.iter()
        .map(|&(category, value)| TreatmentEffect {
            condition_id: condition.id,
            condition_name: condition.name_ja.clone(),
            effect_category: category,
            effect_value: value,
            effect_direction: EffectDirection::Decrease,
            description: describe_effect(
                &condition.name_ja,
                category,
                value,
                EffectDirection::Decrease,
            ),
            provenance: Provenance::Default,
            confidence: DEFAULT_CONFIDENCE,
        })
        .collect()
}
