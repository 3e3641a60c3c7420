//! JSON Lines import integration tests
//!
//! - File import with enrichment and condition resolution
//! - DOI merge across lines in one file
//! - Malformed lines abort the import and write nothing

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use ortho_core::enums::{EvidenceTier, StudyType};
use ortho_db::error::DatabaseError;
use ortho_db::import::read_import;
use ortho_db::service::EvidenceService;

async fn test_service() -> EvidenceService {
    EvidenceService::new_local(":memory:").await.unwrap()
}

fn jsonl_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

// ---------------------------------------------------------------------------
// File import
// ---------------------------------------------------------------------------

#[tokio::test]
async fn import_file_enriches_and_merges() {
    let svc = test_service().await;
    let file = jsonl_file(&[
        r#"{"title":"Randomised trial of early crowding treatment","doi":"10.1000/rct","issue":"crowding","risk_description":"齲蝕リスク20%上昇","age_group":"小児","sample_size":"120"}"#,
        r#"{"title":"Randomised trial of early crowding treatment","doi":"10.1000/rct","journal":"Angle Orthod","risk_description":"齲蝕リスク20%上昇"}"#,
        r#"{"title":"Open bite cohort","condition":"開咬","evidence_tier":"2b","risk_description":"発音障害リスク2倍"}"#,
    ]);

    let summary = svc.import_file(file.path()).await.unwrap();
    assert_eq!(summary.read, 3);
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.merged, 1);
    assert_eq!(summary.findings, 2);

    let records = svc.list_records(10).await.unwrap();
    assert_eq!(records.len(), 2);
    let trial = records
        .iter()
        .find(|r| r.doi.as_deref() == Some("10.1000/rct"))
        .unwrap();
    assert_eq!(trial.journal.as_deref(), Some("Angle Orthod"));
    assert_eq!(trial.study_type, Some(StudyType::RandomizedControlledTrial));
    assert_eq!(trial.sample_size, Some(120));

    let cohort = records.iter().find(|r| r.title == "Open bite cohort").unwrap();
    assert_eq!(cohort.evidence_tier, Some(EvidenceTier::Tier2b));

    assert_eq!(svc.list_findings(Some(1), 10).await.unwrap().len(), 1);
    assert_eq!(svc.list_findings(Some(2), 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_line_aborts_import() {
    let svc = test_service().await;
    let file = jsonl_file(&[
        r#"{"title":"Valid line","condition":"叢生"}"#,
        r#"{"title": "Broken line""#,
    ]);

    let err = svc.import_file(file.path()).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Import { line: 2, .. }));
    assert!(svc.list_records(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_file_is_an_import_error() {
    let svc = test_service().await;
    let dir = tempfile::tempdir().unwrap();
    let err = svc
        .import_file(&dir.path().join("absent.jsonl"))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Import { line: 0, .. }));
}

// ---------------------------------------------------------------------------
// Reader import
// ---------------------------------------------------------------------------

#[test]
fn reader_accepts_loose_fields() {
    let input = concat!(
        r#"{"title":"A","abstract":"Cross-sectional survey of 300 adults","sample_size":"不明"}"#,
        "\n",
        r#"{"abstract_text":"No title here"}"#,
        "\n",
    );
    let records = read_import(input.as_bytes()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sample_size.as_ref().and_then(|s| s.value()), None);
    assert_eq!(records[1].title, "不明");
    assert_eq!(records[1].abstract_text.as_deref(), Some("No title here"));
}
