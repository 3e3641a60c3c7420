//! Research record repository: reads, inserts and DOI merges.

use ortho_core::entities::ResearchRecord;
use ortho_core::import::{ImportRecord, non_empty};
use ortho_synth::enrich::Enrichment;

use crate::error::DatabaseError;
use crate::helpers::{
    encode_string_list, get_opt_string, opt_integer, opt_text, parse_datetime,
    parse_optional_enum, parse_string_list, to_u32,
};
use crate::service::EvidenceService;
use crate::unit_of_work::UnitOfWork;

const RECORD_COLUMNS: &str = "id, pmid, title, authors, publication_year, journal, doi, url, \
     abstract, keywords, mesh_terms, study_type, evidence_tier, sample_size, \
     confidence_interval, target_age_group, imported_at";

fn row_to_record(row: &libsql::Row) -> Result<ResearchRecord, DatabaseError> {
    let publication_year = row
        .get::<Option<i64>>(4)?
        .map(|year| {
            i32::try_from(year).map_err(|_| {
                DatabaseError::InvalidState(format!("publication_year out of range: {year}"))
            })
        })
        .transpose()?;
    let sample_size = row
        .get::<Option<i64>>(13)?
        .map(|n| to_u32(n, "sample_size"))
        .transpose()?;

    Ok(ResearchRecord {
        id: row.get::<i64>(0)?,
        pmid: get_opt_string(row, 1)?,
        title: row.get::<String>(2)?,
        authors: get_opt_string(row, 3)?,
        publication_year,
        journal: get_opt_string(row, 5)?,
        doi: get_opt_string(row, 6)?,
        url: get_opt_string(row, 7)?,
        abstract_text: get_opt_string(row, 8)?,
        keywords: parse_string_list(&row.get::<String>(9)?)?,
        mesh_terms: parse_string_list(&row.get::<String>(10)?)?,
        study_type: parse_optional_enum(get_opt_string(row, 11)?.as_deref())?,
        evidence_tier: parse_optional_enum(get_opt_string(row, 12)?.as_deref())?,
        sample_size,
        confidence_interval: get_opt_string(row, 14)?,
        target_age_group: get_opt_string(row, 15)?,
        imported_at: parse_datetime(&row.get::<String>(16)?)?,
    })
}

/// Bind values shared by insert and merge, as `?1..?15` in
/// `RECORD_COLUMNS` order (without `id` and `imported_at`).
fn record_values(
    record: &ImportRecord,
    enrichment: &Enrichment,
) -> Result<Vec<libsql::Value>, DatabaseError> {
    Ok(vec![
        opt_text(non_empty(record.pmid.as_deref())),
        libsql::Value::Text(record.title.clone()),
        opt_text(non_empty(record.authors.as_deref())),
        opt_integer(record.publication_year.map(i64::from)),
        opt_text(non_empty(record.journal.as_deref())),
        opt_text(non_empty(record.doi.as_deref())),
        opt_text(non_empty(record.url.as_deref())),
        opt_text(non_empty(record.abstract_text.as_deref())),
        libsql::Value::Text(encode_string_list(&record.keywords)?),
        libsql::Value::Text(encode_string_list(&record.mesh_terms)?),
        libsql::Value::Text(enrichment.study_type.as_str().to_string()),
        libsql::Value::Text(enrichment.evidence_tier.as_str().to_string()),
        opt_integer(enrichment.sample_size.map(i64::from)),
        opt_text(enrichment.confidence_interval.as_deref()),
        libsql::Value::Text(enrichment.target_age_group.clone()),
    ])
}

impl EvidenceService {
    /// List research records in import order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_records(&self, limit: u32) -> Result<Vec<ResearchRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {RECORD_COLUMNS} FROM research_records ORDER BY id LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    /// Get a research record by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the record does not exist.
    pub async fn get_record(&self, id: i64) -> Result<ResearchRecord, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {RECORD_COLUMNS} FROM research_records WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_record(&row)
    }

    /// Id of the record carrying `doi`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub(crate) async fn record_id_by_doi(
        uow: &UnitOfWork,
        doi: &str,
    ) -> Result<Option<i64>, DatabaseError> {
        let mut rows = uow
            .query("SELECT id FROM research_records WHERE doi = ?1", [doi])
            .await?;
        Ok(match rows.next().await? {
            Some(row) => Some(row.get::<i64>(0)?),
            None => None,
        })
    }

    /// Insert a new record and return its id.
    pub(crate) async fn insert_record(
        uow: &UnitOfWork,
        record: &ImportRecord,
        enrichment: &Enrichment,
    ) -> Result<i64, DatabaseError> {
        let values = record_values(record, enrichment)?;
        uow.execute(
            "INSERT INTO research_records (pmid, title, authors, publication_year, journal, doi, url,
                 abstract, keywords, mesh_terms, study_type, evidence_tier, sample_size,
                 confidence_interval, target_age_group)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            libsql::params_from_iter(values),
        )
        .await?;
        Ok(uow.last_insert_rowid())
    }

    /// Fill fields of record `id` that are still empty. Existing values are
    /// never overwritten.
    pub(crate) async fn merge_record(
        uow: &UnitOfWork,
        id: i64,
        record: &ImportRecord,
        enrichment: &Enrichment,
    ) -> Result<(), DatabaseError> {
        let mut values = record_values(record, enrichment)?;
        values.push(libsql::Value::Integer(id));
        uow.execute(
            "UPDATE research_records SET
                 pmid = COALESCE(pmid, ?1),
                 authors = COALESCE(authors, ?3),
                 publication_year = COALESCE(publication_year, ?4),
                 journal = COALESCE(journal, ?5),
                 url = COALESCE(url, ?7),
                 abstract = COALESCE(abstract, ?8),
                 keywords = CASE WHEN keywords = '[]' THEN ?9 ELSE keywords END,
                 mesh_terms = CASE WHEN mesh_terms = '[]' THEN ?10 ELSE mesh_terms END,
                 study_type = COALESCE(study_type, ?11),
                 evidence_tier = COALESCE(evidence_tier, ?12),
                 sample_size = COALESCE(sample_size, ?13),
                 confidence_interval = COALESCE(confidence_interval, ?14),
                 target_age_group = COALESCE(target_age_group, ?15)
             WHERE id = ?16",
            libsql::params_from_iter(values),
        )
        .await?;
        Ok(())
    }
}
