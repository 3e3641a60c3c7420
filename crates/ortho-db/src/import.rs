//! JSON Lines import with enrichment and DOI de-duplication.
//!
//! Each line is an [`ImportRecord`]. Missing metadata is filled by
//! [`ortho_synth::enrich::enrich`]; the record and its single risk finding are
//! then written inside one unit of work covering the whole file. A DOI that
//! already exists merges into the stored record (empty fields only) and never
//! adds a second finding.

use std::io::BufRead;
use std::path::Path;

use serde_jsonlines::JsonLinesReader;
use tracing::{info, warn};

use ortho_core::entities::{DentalCondition, Finding};
use ortho_core::enums::FindingKind;
use ortho_core::import::{ImportRecord, non_empty};
use ortho_core::responses::ImportSummary;
use ortho_synth::enrich::{Enrichment, enrich};
use ortho_synth::extract::{OTHER_CONDITION_CODE, age_range, extract_signal};

use crate::error::DatabaseError;
use crate::helpers::written;
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

/// Read every record of a JSON Lines file.
///
/// # Errors
///
/// Returns `DatabaseError::Import` naming the first unreadable line.
pub fn read_import_file(path: &Path) -> Result<Vec<ImportRecord>, DatabaseError> {
    let lines = serde_jsonlines::json_lines::<ImportRecord, _>(path).map_err(|e| {
        DatabaseError::Import {
            line: 0,
            reason: format!("{}: {e}", path.display()),
        }
    })?;
    collect_lines(lines)
}

/// Read every record from a buffered reader (e.g. stdin).
///
/// # Errors
///
/// Returns `DatabaseError::Import` naming the first unreadable line.
pub fn read_import<R: BufRead>(reader: R) -> Result<Vec<ImportRecord>, DatabaseError> {
    collect_lines(JsonLinesReader::new(reader).read_all::<ImportRecord>())
}

fn collect_lines<I>(lines: I) -> Result<Vec<ImportRecord>, DatabaseError>
where
    I: Iterator<Item = std::io::Result<ImportRecord>>,
{
    lines
        .enumerate()
        .map(|(index, line)| {
            line.map_err(|e| DatabaseError::Import {
                line: index + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

impl EvidenceService {
    /// Import a JSON Lines file in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file cannot be read or any write fails;
    /// nothing is written in that case.
    pub async fn import_file(&self, path: &Path) -> Result<ImportSummary, DatabaseError> {
        let records = read_import_file(path)?;
        self.import_records(&records).await
    }

    /// Import already-parsed records in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any write fails; the whole import is rolled
    /// back in that case.
    pub async fn import_records(
        &self,
        records: &[ImportRecord],
    ) -> Result<ImportSummary, DatabaseError> {
        let uow = self.begin("import").await?;
        let result = self.import_within(&uow, records).await;
        let summary = uow.finish(result).await?;
        info!(
            read = summary.read,
            imported = summary.imported,
            merged = summary.merged,
            findings = summary.findings,
            "import complete"
        );
        Ok(summary)
    }

    async fn import_within(
        &self,
        uow: &UnitOfWork,
        records: &[ImportRecord],
    ) -> Result<ImportSummary, DatabaseError> {
        let mut summary = ImportSummary {
            read: written(records.len())?,
            ..ImportSummary::default()
        };

        for record in records {
            let enrichment = enrich(record);
            let condition = self.condition_for(&enrichment).await?;

            let existing = match non_empty(record.doi.as_deref()) {
                Some(doi) => Self::record_id_by_doi(uow, doi).await?,
                None => None,
            };
            let record_id = if let Some(id) = existing {
                warn!(
                    doi = ?record.doi,
                    record_id = id,
                    "duplicate DOI; merging into existing record"
                );
                Self::merge_record(uow, id, record, &enrichment).await?;
                summary.merged += 1;
                id
            } else {
                let id = Self::insert_record(uow, record, &enrichment).await?;
                summary.imported += 1;
                id
            };

            let finding = finding_for(record_id, &condition, &enrichment);
            if Self::insert_finding(uow, &finding).await? {
                summary.findings += 1;
            }
        }
        Ok(summary)
    }

    /// Condition named by the line, else classified from its text, else `other`.
    async fn condition_for(
        &self,
        enrichment: &Enrichment,
    ) -> Result<DentalCondition, DatabaseError> {
        if let Some(hint) = enrichment.condition_hint.as_deref() {
            if let Some(condition) = self.resolve_condition(hint).await? {
                return Ok(condition);
            }
            warn!(condition = hint, "unknown condition; classifying from record text");
        }
        if let Some(condition) = self.condition_by_code(enrichment.classified_condition).await? {
            return Ok(condition);
        }
        self.condition_by_code(OTHER_CONDITION_CODE)
            .await?
            .ok_or_else(|| {
                DatabaseError::InvalidState(format!(
                    "reference condition '{OTHER_CONDITION_CODE}' is missing"
                ))
            })
    }
}

fn finding_for(record_id: i64, condition: &DentalCondition, enrichment: &Enrichment) -> Finding {
    let signal = extract_signal(&enrichment.risk_description);
    let (age_min, age_max) = age_range(Some(&enrichment.target_age_group));
    Finding {
        id: 0,
        record_id,
        condition_id: condition.id,
        kind: FindingKind::Risk,
        description: enrichment.risk_description.clone(),
        effect_value: signal.value,
        effect_direction: signal.direction,
        age_min,
        age_max,
        confidence_interval: enrichment.confidence_interval.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use ortho_core::enums::{EffectDirection, EvidenceTier, StudyType};

    use super::*;
    use crate::test_support::{import_line, test_service};

    #[test]
    fn reads_lines_and_reports_bad_line_numbers() {
        let input = concat!(
            r#"{"title": "A", "doi": "10.1/a"}"#,
            "\n",
            r#"{"title": "B", "sample_size": "不明"}"#,
            "\n",
        );
        let records = read_import(Cursor::new(input)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "B");

        let broken = concat!(r#"{"title": "A"}"#, "\n", "{not json}\n");
        let err = read_import(Cursor::new(broken)).unwrap_err();
        assert!(matches!(err, DatabaseError::Import { line: 2, .. }));
    }

    #[tokio::test]
    async fn import_enriches_and_extracts_finding() {
        let svc = test_service().await;
        let record = ImportRecord {
            title: "Crowding and caries in a randomized controlled trial".into(),
            abstract_text: Some(
                "N = 240 participants were followed; crowding carried a 35% higher risk of caries.".into(),
            ),
            condition: Some("叢生".into()),
            age_group: Some("青年".into()),
            ..ImportRecord::default()
        };

        let summary = svc.import_records(&[record]).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                read: 1,
                imported: 1,
                merged: 0,
                findings: 1
            }
        );

        let stored = svc.list_records(10).await.unwrap();
        assert_eq!(stored[0].study_type, Some(StudyType::RandomizedControlledTrial));
        assert_eq!(stored[0].evidence_tier, Some(EvidenceTier::Tier1b));
        assert_eq!(stored[0].sample_size, Some(240));

        let findings = svc.list_findings(None, 10).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].condition_id, 1);
        assert_eq!((findings[0].age_min, findings[0].age_max), (13, 18));
        assert_eq!(findings[0].effect_direction, EffectDirection::Increase);
    }

    #[tokio::test]
    async fn unknown_condition_falls_back_to_classification() {
        let svc = test_service().await;
        let lines = [
            import_line(
                "Posterior crossbite outcomes",
                None,
                "歯ぎしり",
                "咀嚼効率20%低下",
                "成人",
            ),
            import_line("Something unrelated", None, "歯ぎしり", "リスク10%上昇", "成人"),
        ];
        svc.import_records(&lines).await.unwrap();

        let findings = svc.list_findings(None, 10).await.unwrap();
        let crossbite = svc.condition_by_code("crossbite").await.unwrap().unwrap();
        let other = svc.condition_by_code("other").await.unwrap().unwrap();
        assert_eq!(findings[0].condition_id, crossbite.id);
        assert_eq!(findings[1].condition_id, other.id);
    }

    #[tokio::test]
    async fn duplicate_doi_merges_without_second_finding() {
        let svc = test_service().await;
        let first = import_line(
            "Open bite cohort",
            Some("10.1000/ob"),
            "開咬",
            "発音障害リスク2倍",
            "小児",
        );
        let mut second = first.clone();
        second.journal = Some("Angle Orthod".into());
        second.title = "Open bite cohort (corrected)".into();

        svc.import_records(&[first]).await.unwrap();
        let summary = svc.import_records(&[second]).await.unwrap();
        assert_eq!(summary.imported, 0);
        assert_eq!(summary.merged, 1);
        assert_eq!(summary.findings, 0);

        let records = svc.list_records(10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Open bite cohort");
        assert_eq!(records[0].journal.as_deref(), Some("Angle Orthod"));
        assert_eq!(svc.list_findings(None, 10).await.unwrap().len(), 1);
    }
}
