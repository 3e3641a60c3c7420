//! Regeneration integration tests
//!
//! - Import -> regenerate -> readers over an in-memory store
//! - Idempotence: a second run leaves every derived table identical
//! - Atomicity: a failing table write rolls back all five tables
//! - Scoring and economic lookups over the regenerated tables
//! - Reset back to reference data

use pretty_assertions::assert_eq;

use ortho_core::enums::{AgeGroupCode, EffectDirection};
use ortho_core::import::ImportRecord;
use ortho_db::service::EvidenceService;

async fn test_service() -> EvidenceService {
    EvidenceService::new_local(":memory:").await.unwrap()
}

fn evidence_lines() -> Vec<ImportRecord> {
    vec![
        ImportRecord {
            title: "Crowding and caries risk in adolescents".into(),
            doi: Some("10.1000/crowding".into()),
            condition: Some("叢生".into()),
            risk_description: Some("5年後齲蝕リスク42%上昇".into()),
            age_group: Some("青年".into()),
            evidence_level: Some("1b".into()),
            ..ImportRecord::default()
        },
        ImportRecord {
            title: "Open bite and speech in children".into(),
            condition: Some("open_bite".into()),
            risk_description: Some("発音障害リスク2.5倍".into()),
            age_group: Some("小児".into()),
            ..ImportRecord::default()
        },
        ImportRecord {
            title: "Class III malocclusion outcomes".into(),
            condition: Some("受け口".into()),
            risk_description: Some("咀嚼効率30%低下".into()),
            age_group: Some("成人".into()),
            ..ImportRecord::default()
        },
    ]
}

async fn populated_service() -> EvidenceService {
    let svc = test_service().await;
    svc.import_records(&evidence_lines()).await.unwrap();
    svc
}

// ---------------------------------------------------------------------------
// Regeneration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn regenerate_fills_every_table() {
    let svc = populated_service().await;
    let summary = svc.regenerate_all().await.unwrap();

    assert_eq!(summary.risk_profiles, 5);
    assert_eq!(summary.timing_benefits, 5);
    assert_eq!(summary.future_scenarios, 9);
    assert_eq!(summary.economic_impacts, 5);
    // Crowding, open bite and mandibular protrusion aggregate into one row
    // each; the other four seeded conditions get two default rows.
    assert_eq!(summary.treatment_effects, 3 + 4 * 2);

    let effects = svc.list_treatment_effects(Some(1)).await.unwrap();
    assert!(!effects.is_empty());
    assert!(effects.iter().all(|e| e.condition_id == 1));
    assert!(effects.iter().all(|e| e.condition_name == "叢生"));
    let crowding = effects
        .iter()
        .find(|e| !e.provenance.is_default())
        .unwrap();
    assert_eq!(crowding.effect_direction, EffectDirection::Increase);
}

#[tokio::test]
async fn regenerate_is_idempotent() {
    let svc = populated_service().await;

    svc.regenerate_all().await.unwrap();
    let risk = svc.list_risk_profiles().await.unwrap();
    let effects = svc.list_treatment_effects(None).await.unwrap();
    let timing = svc.list_timing_benefits(None).await.unwrap();
    let scenarios = svc.list_future_scenarios(None).await.unwrap();
    let economic = svc.list_economic_impacts().await.unwrap();

    svc.regenerate_all().await.unwrap();
    assert_eq!(svc.list_risk_profiles().await.unwrap(), risk);
    assert_eq!(svc.list_treatment_effects(None).await.unwrap(), effects);
    assert_eq!(svc.list_timing_benefits(None).await.unwrap(), timing);
    assert_eq!(svc.list_future_scenarios(None).await.unwrap(), scenarios);
    assert_eq!(svc.list_economic_impacts().await.unwrap(), economic);
}

#[tokio::test]
async fn failed_write_rolls_back_every_table() {
    let svc = test_service().await;
    svc.regenerate_all().await.unwrap();
    let risk_before = svc.list_risk_profiles().await.unwrap();
    let effects_before = svc.list_treatment_effects(None).await.unwrap();
    assert!(effects_before.iter().all(|e| e.provenance.is_default()));

    svc.import_records(&evidence_lines()).await.unwrap();
    svc.db()
        .conn()
        .execute(
            "CREATE TRIGGER fail_timing BEFORE INSERT ON timing_benefits \
             BEGIN SELECT RAISE(ABORT, 'timing write refused'); END",
            (),
        )
        .await
        .unwrap();

    assert!(svc.regenerate_all().await.is_err());
    assert_eq!(svc.list_risk_profiles().await.unwrap(), risk_before);
    assert_eq!(svc.list_treatment_effects(None).await.unwrap(), effects_before);
    assert_eq!(svc.list_timing_benefits(None).await.unwrap().len(), 5);

    svc.db()
        .conn()
        .execute("DROP TRIGGER fail_timing", ())
        .await
        .unwrap();
    svc.regenerate_all().await.unwrap();
    let effects_after = svc.list_treatment_effects(None).await.unwrap();
    assert!(effects_after.iter().any(|e| !e.provenance.is_default()));
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn readers_filter_by_age_and_condition() {
    let svc = populated_service().await;
    svc.regenerate_all().await.unwrap();

    let timing = svc.list_timing_benefits(Some(10)).await.unwrap();
    assert_eq!(timing.len(), 1);
    assert_eq!(timing[0].age_group, AgeGroupCode::Pediatric);
    assert_eq!(timing[0].timing_score, 100);

    let scenarios = svc.list_future_scenarios(Some(30)).await.unwrap();
    let years: Vec<u32> = scenarios.iter().map(|s| s.timeframe_years).collect();
    assert_eq!(years, vec![5, 10, 20]);
    assert!(scenarios.iter().all(|s| s.age_min == 19 && s.age_max == 40));

    let findings = svc.list_findings(Some(6), 10).await.unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].effect_direction, EffectDirection::Decrease);
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[tokio::test]
async fn necessity_over_regenerated_tables() {
    let svc = populated_service().await;
    svc.regenerate_all().await.unwrap();

    let result = svc.calculate_necessity(10, &[1, 2]).await;
    assert!(!result.fallback);
    assert!((10..=100).contains(&result.total_score));
    assert_eq!(result.timing_score, 35);

    let empty = svc.calculate_necessity(10, &[]).await;
    assert_eq!(empty.total_score, 0);

    let out_of_range = svc.calculate_necessity(150, &[1]).await;
    assert!(out_of_range.fallback);
    assert_eq!(out_of_range.total_score, 50);
}

#[tokio::test]
async fn economic_view_uses_fallback_until_regenerated() {
    let svc = test_service().await;
    let fallback = svc.economic_impact(45).await;
    assert_eq!(fallback.current_cost, 400_000);
    assert_eq!(fallback.net_benefit, 500_000);

    svc.regenerate_all().await.unwrap();
    let adult = svc.economic_impact(45).await;
    assert_eq!(adult.current_cost, 450_000);
    assert_eq!(adult.future_savings, 585_000);
    assert_eq!(adult.net_benefit, 135_000);
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reset_restores_reference_data() {
    let svc = populated_service().await;
    svc.regenerate_all().await.unwrap();

    let response = svc.reset().await.unwrap();
    assert!(response.reset);
    assert_eq!(response.conditions, 7);
    assert!(svc.list_records(50).await.unwrap().is_empty());
    assert!(svc.list_economic_impacts().await.unwrap().is_empty());

    let codes: Vec<String> = svc
        .conditions_by_id()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.code)
        .collect();
    assert_eq!(codes[0], "crowding");
    assert_eq!(codes[6], "other");
}
