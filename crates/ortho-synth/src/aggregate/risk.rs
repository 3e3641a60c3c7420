use tracing::info;

use ortho_core::entities::{AgeRiskProfile, RISK_TYPE_TOOTH_LOSS};
use ortho_core::enums::EffectDirection;
use ortho_core::provenance::Provenance;

use super::{DEFAULT_CONFIDENCE, WeightedFinding, weighted_confidence};
use crate::narrative::{describe_default_risk, describe_risk};

/// Age thresholds that always receive a risk profile, ascending.
pub const RISK_THRESHOLDS: [u32; 5] = [12, 18, 25, 40, 60];

/// One tooth-loss risk profile per threshold.
///
/// A threshold aggregates every increase finding whose age range reaches it.
/// Without any valued, weighted finding it falls back to `T / 2`.
#[must_use]
pub fn risk_profiles(findings: &[WeightedFinding]) -> Vec<AgeRiskProfile> {
    RISK_THRESHOLDS
        .into_iter()
        .map(|threshold| profile_for(threshold, findings))
        .collect()
}

fn profile_for(threshold: u32, findings: &[WeightedFinding]) -> AgeRiskProfile {
    let qualifying: Vec<&WeightedFinding> = findings
        .iter()
        .filter(|wf| {
            wf.finding.effect_direction == EffectDirection::Increase
                && wf.finding.age_max >= threshold
        })
        .collect();

    let mut total_weight = 0.0;
    let mut weighted_risk = 0.0;
    let mut records = Vec::new();
    for wf in &qualifying {
        if let Some(value) = wf.finding.effect_value {
            let weight = wf.weight();
            weighted_risk += value * weight;
            total_weight += weight;
            records.push(wf.finding.record_id);
        }
    }

    if total_weight > 0.0 {
        let risk = (weighted_risk / total_weight).clamp(0.0, 100.0);
        AgeRiskProfile {
            age_threshold: threshold,
            risk_type: RISK_TYPE_TOOTH_LOSS.to_string(),
            risk_value: risk,
            description: describe_risk(threshold, risk),
            provenance: Provenance::from_records(records),
            confidence: weighted_confidence(total_weight, qualifying.len()),
        }
    } else {
        let risk = f64::from(threshold) / 2.0;
        info!(threshold, "no weighted risk evidence; using default profile");
        AgeRiskProfile {
            age_threshold: threshold,
            risk_type: RISK_TYPE_TOOTH_LOSS.to_string(),
            risk_value: risk,
            description: describe_default_risk(threshold, risk),
            provenance: Provenance::Default,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use ortho_core::enums::EvidenceTier;

    use super::*;
    use crate::aggregate::fixtures::finding;

    #[test]
    fn empty_evidence_yields_default_for_every_threshold() {
        let profiles = risk_profiles(&[]);
        assert_eq!(profiles.len(), RISK_THRESHOLDS.len());
        for (profile, threshold) in profiles.iter().zip(RISK_THRESHOLDS) {
            assert_eq!(profile.age_threshold, threshold);
            assert!((profile.risk_value - f64::from(threshold) / 2.0).abs() < f64::EPSILON);
            assert!(profile.provenance.is_default());
            assert!((profile.confidence - 0.5).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn weighted_mean_over_qualifying_increase_findings() {
        let findings = vec![
            finding(
                1,
                1,
                "42%上昇",
                Some(40.0),
                EffectDirection::Increase,
                (13, 59),
                Some(EvidenceTier::Tier1a),
            ),
            finding(
                2,
                1,
                "10%上昇",
                Some(10.0),
                EffectDirection::Increase,
                (19, 100),
                Some(EvidenceTier::Tier5),
            ),
            finding(
                3,
                1,
                "20%減少",
                Some(20.0),
                EffectDirection::Decrease,
                (1, 100),
                Some(EvidenceTier::Tier1a),
            ),
            finding(
                4,
                1,
                "上昇",
                None,
                EffectDirection::Increase,
                (1, 100),
                Some(EvidenceTier::Tier1a),
            ),
        ];
        let profiles = risk_profiles(&findings);

        // T=12: records 1, 2 and the valueless 4 qualify.
        let twelve = &profiles[0];
        let expected = 40.0f64.mul_add(5.0, 10.0 * 0.5) / 5.5;
        assert!((twelve.risk_value - expected).abs() < 1e-9);
        assert_eq!(twelve.provenance, Provenance::Records(vec![1, 2]));
        // 5.5 / 3 exceeds the cap.
        assert!((twelve.confidence - 0.95).abs() < f64::EPSILON);

        // T=60: record 1 stops at 59.
        let sixty = &profiles[4];
        assert!((sixty.risk_value - 10.0).abs() < 1e-9);
        assert_eq!(sixty.provenance, Provenance::Records(vec![2]));
        assert!((sixty.confidence - 0.25).abs() < 1e-9);
    }

    #[test]
    fn stronger_tier_pulls_the_mean_toward_its_value() {
        let weak = vec![
            finding(
                1,
                1,
                "a",
                Some(80.0),
                EffectDirection::Increase,
                (1, 100),
                Some(EvidenceTier::Tier5),
            ),
            finding(
                2,
                1,
                "b",
                Some(20.0),
                EffectDirection::Increase,
                (1, 100),
                Some(EvidenceTier::Tier3),
            ),
        ];
        let mut strong = weak.clone();
        strong[0].tier = Some(EvidenceTier::Tier1a);

        let weak_risk = risk_profiles(&weak)[0].risk_value;
        let strong_risk = risk_profiles(&strong)[0].risk_value;
        assert!(strong_risk > weak_risk);
        assert!((80.0 - strong_risk) < (80.0 - weak_risk));
    }

    #[test]
    fn values_above_one_hundred_are_clamped() {
        let findings = vec![finding(
            9,
            1,
            "3倍",
            Some(200.0),
            EffectDirection::Increase,
            (1, 100),
            Some(EvidenceTier::Tier2a),
        )];
        for profile in risk_profiles(&findings) {
            assert!((profile.risk_value - 100.0).abs() < f64::EPSILON);
            assert!(profile.confidence <= 0.95);
        }
    }
}
