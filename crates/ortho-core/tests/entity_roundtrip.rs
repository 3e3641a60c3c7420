//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::Utc;
use schemars::schema_for;
use ortho_core::entities::*;
use ortho_core::enums::*;
use ortho_core::import::{ImportRecord, LooseCount};
use ortho_core::provenance::Provenance;
use ortho_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    research_record_roundtrip,
    ResearchRecord,
    ResearchRecord {
        id: 12,
        pmid: Some("31234567".into()),
        title: "Crowding and caries incidence in adolescents".into(),
        authors: Some("Tanaka H, Suzuki K".into()),
        publication_year: Some(2021),
        journal: Some("Am J Orthod Dentofacial Orthop".into()),
        doi: Some("10.1016/j.ajodo.2021.01.001".into()),
        url: Some("https://pubmed.ncbi.nlm.nih.gov/31234567/".into()),
        abstract_text: Some("A cohort of 240 adolescents was followed.".into()),
        keywords: vec!["crowding".into(), "caries".into()],
        mesh_terms: vec!["Malocclusion".into()],
        study_type: Some(StudyType::CohortStudy),
        evidence_tier: Some(EvidenceTier::Tier2a),
        sample_size: Some(240),
        confidence_interval: Some("95% CI: 1.2-2.4".into()),
        target_age_group: Some("青年".into()),
        imported_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    condition_roundtrip,
    DentalCondition,
    DentalCondition {
        id: 1,
        code: "crowding".into(),
        name_ja: "叢生".into(),
        name_en: "Crowding".into(),
        severity_base_score: 60,
    }
);

roundtrip_and_validate!(
    finding_roundtrip,
    Finding,
    Finding {
        id: 3,
        record_id: 12,
        condition_id: 1,
        kind: FindingKind::Risk,
        description: "5年後齲蝕リスク42%上昇".into(),
        effect_value: Some(42.0),
        effect_direction: EffectDirection::Increase,
        age_min: 13,
        age_max: 18,
        confidence_interval: None,
    }
);

roundtrip_and_validate!(
    risk_profile_roundtrip,
    AgeRiskProfile,
    AgeRiskProfile {
        age_threshold: 18,
        risk_type: RISK_TYPE_TOOTH_LOSS.into(),
        risk_value: 42.5,
        description: "18歳までに矯正を行わないと".into(),
        provenance: Provenance::Records(vec![1, 4]),
        confidence: 0.75,
    }
);

roundtrip_and_validate!(
    treatment_effect_roundtrip,
    TreatmentEffect,
    TreatmentEffect {
        condition_id: 1,
        condition_name: "叢生".into(),
        effect_category: EffectCategory::CariesRisk,
        effect_value: 38.0,
        effect_direction: EffectDirection::Decrease,
        description: "叢生を矯正することで、齲蝕リスクが38%減少します。".into(),
        provenance: Provenance::Default,
        confidence: 0.5,
    }
);

roundtrip_and_validate!(
    timing_benefit_roundtrip,
    TimingBenefit,
    TimingBenefit {
        age_group: AgeGroupCode::Adolescent,
        age_min: 13,
        age_max: 18,
        label: AgeGroupCode::Adolescent.label_ja().into(),
        benefit_text: "顎の成長がまだ続いており".into(),
        recommendation: RecommendationTier::Recommended,
        timing_score: 80,
        provenance: Provenance::Default,
        confidence: 0.7,
    }
);

roundtrip_and_validate!(
    scenario_roundtrip,
    FutureScenario,
    FutureScenario {
        timeframe_years: 10,
        timeframe_label: "10年後".into(),
        age_min: 19,
        age_max: 40,
        with_treatment: "歯並びが改善され、清掃性が向上.".into(),
        without_treatment: "歯列不正が継続.".into(),
        provenance: Provenance::Default,
        confidence: 0.6,
    }
);

roundtrip_and_validate!(
    economic_impact_roundtrip,
    EconomicImpact,
    EconomicImpact {
        age_group: AgeGroupCode::Pediatric,
        age_min: 7,
        age_max: 12,
        label: AgeGroupCode::Pediatric.label_ja().into(),
        current_cost: 300_000,
        future_savings: 1_500_000,
        roi: 400.0,
        calculation_basis: "医療費削減推計".into(),
        provenance: Provenance::Default,
        confidence: 0.7,
    }
);

roundtrip_and_validate!(
    economic_view_roundtrip,
    EconomicImpactView,
    EconomicImpactView {
        current_cost: 400_000,
        future_savings: 900_000,
        net_benefit: 500_000,
        roi: 125.0,
        monthly_benefit: 2500,
    }
);

roundtrip_and_validate!(
    necessity_roundtrip,
    NecessityScoreResult,
    NecessityScoreResult {
        total_score: 72,
        timing_score: 35,
        severity_score: 32,
        risk_score: 1,
        prevention_bonus: 4.0,
        complexity_bonus: 0.0,
        interpretation: "高い矯正必要性。".into(),
        urgency: UrgencyTier::High,
        fallback: false,
    }
);

roundtrip_and_validate!(
    import_record_roundtrip,
    ImportRecord,
    ImportRecord {
        title: "Open bite and speech".into(),
        doi: Some("10.1000/xyz".into()),
        sample_size: Some(LooseCount::Text("不明".into())),
        condition: Some("開咬".into()),
        risk_description: Some("発音障害リスク2.5倍".into()),
        ..ImportRecord::default()
    }
);

roundtrip_and_validate!(
    regenerate_summary_roundtrip,
    RegenerateSummary,
    RegenerateSummary {
        risk_profiles: 5,
        treatment_effects: 14,
        timing_benefits: 5,
        future_scenarios: 9,
        economic_impacts: 5,
    }
);

roundtrip_and_validate!(
    import_summary_roundtrip,
    ImportSummary,
    ImportSummary {
        read: 10,
        imported: 8,
        merged: 2,
        findings: 8,
    }
);
