//! Shared test utilities for ortho-db unit tests.

use ortho_core::import::ImportRecord;

use crate::service::EvidenceService;

/// In-memory service with the schema migrated and reference data seeded.
pub(crate) async fn test_service() -> EvidenceService {
    EvidenceService::new_local(":memory:").await.unwrap()
}

/// Minimal import line carrying a risk statement.
pub(crate) fn import_line(
    title: &str,
    doi: Option<&str>,
    condition: &str,
    risk_description: &str,
    age_group: &str,
) -> ImportRecord {
    ImportRecord {
        title: title.to_string(),
        doi: doi.map(str::to_string),
        condition: Some(condition.to_string()),
        risk_description: Some(risk_description.to_string()),
        age_group: Some(age_group.to_string()),
        ..ImportRecord::default()
    }
}
