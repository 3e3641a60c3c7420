//! Reference condition repository: lookups and free-text resolution.

use ortho_core::entities::DentalCondition;

use crate::error::DatabaseError;
use crate::helpers::to_u32;
use crate::service::EvidenceService;

const CONDITION_COLUMNS: &str = "id, code, name_ja, name_en, severity_base_score";

fn row_to_condition(row: &libsql::Row) -> Result<DentalCondition, DatabaseError> {
    Ok(DentalCondition {
        id: row.get::<i64>(0)?,
        code: row.get::<String>(1)?,
        name_ja: row.get::<String>(2)?,
        name_en: row.get::<String>(3)?,
        severity_base_score: to_u32(row.get::<i64>(4)?, "severity_base_score")?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<DentalCondition>, DatabaseError> {
    let mut conditions = Vec::new();
    while let Some(row) = rows.next().await? {
        conditions.push(row_to_condition(&row)?);
    }
    Ok(conditions)
}

impl EvidenceService {
    /// All reference conditions, most severe first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_conditions(&self) -> Result<Vec<DentalCondition>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {CONDITION_COLUMNS} FROM dental_conditions
                     ORDER BY severity_base_score DESC, id"
                ),
                (),
            )
            .await?;
        collect(rows).await
    }

    /// All reference conditions in id order (the synthesis order).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn conditions_by_id(&self) -> Result<Vec<DentalCondition>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {CONDITION_COLUMNS} FROM dental_conditions ORDER BY id"),
                (),
            )
            .await?;
        collect(rows).await
    }

    /// Get a condition by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the condition does not exist.
    pub async fn get_condition(&self, id: i64) -> Result<DentalCondition, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {CONDITION_COLUMNS} FROM dental_conditions WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_condition(&row)
    }

    /// Get a condition by its code (`crowding`, `other`, ...).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn condition_by_code(
        &self,
        code: &str,
    ) -> Result<Option<DentalCondition>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {CONDITION_COLUMNS} FROM dental_conditions WHERE code = ?1"),
                [code],
            )
            .await?;
        rows.next().await?.map(|row| row_to_condition(&row)).transpose()
    }

    /// Resolve a condition named in an import line.
    ///
    /// Matches the code, either name, or a seeded keyword, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn resolve_condition(
        &self,
        name: &str,
    ) -> Result<Option<DentalCondition>, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT c.id, c.code, c.name_ja, c.name_en, c.severity_base_score
                 FROM dental_conditions c
                 WHERE lower(c.code) = lower(?1)
                    OR c.name_ja = ?1
                    OR lower(c.name_en) = lower(?1)
                    OR EXISTS (
                        SELECT 1 FROM condition_keywords k
                        WHERE k.condition_id = c.id AND lower(k.keyword) = lower(?1)
                    )
                 ORDER BY c.id
                 LIMIT 1",
                [name],
            )
            .await?;
        rows.next().await?.map(|row| row_to_condition(&row)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::test_support::test_service;

    #[tokio::test]
    async fn list_orders_by_severity() {
        let svc = test_service().await;
        let conditions = svc.list_conditions().await.unwrap();
        assert_eq!(conditions.len(), 7);
        assert_eq!(conditions[0].code, "mandibular_protrusion");
        assert_eq!(conditions.last().unwrap().code, "other");
        assert!(
            conditions
                .windows(2)
                .all(|pair| pair[0].severity_base_score >= pair[1].severity_base_score)
        );
    }

    #[tokio::test]
    async fn get_missing_condition_is_no_result() {
        let svc = test_service().await;
        assert_eq!(svc.get_condition(2).await.unwrap().name_ja, "開咬");
        assert!(svc.get_condition(99).await.is_err());
    }

    #[rstest]
    #[case("叢生", Some("crowding"))]
    #[case("Open Bite", Some("open_bite"))]
    #[case("deep_bite", Some("deep_bite"))]
    #[case("受け口", Some("mandibular_protrusion"))]
    #[case("CLASS II MALOCCLUSION", Some("maxillary_protrusion"))]
    #[case("歯ぎしり", None)]
    #[case("  ", None)]
    #[tokio::test]
    async fn resolves_names_codes_and_keywords(#[case] name: &str, #[case] expected: Option<&str>) {
        let svc = test_service().await;
        let resolved = svc.resolve_condition(name).await.unwrap();
        assert_eq!(resolved.map(|c| c.code).as_deref(), expected);
    }
}
