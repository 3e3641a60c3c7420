use ortho_db::service::EvidenceService;

/// How a `--condition` argument refers to a reference condition.
#[derive(Debug, PartialEq, Eq)]
pub enum ConditionRef<'a> {
    Id(i64),
    Name(&'a str),
}

#[must_use]
pub fn parse_condition_ref(raw: &str) -> ConditionRef<'_> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .map_or(ConditionRef::Name(raw), ConditionRef::Id)
}

/// Resolve an id, code, Japanese or English name, or keyword to a condition id.
///
/// Numeric ids are passed through unchecked; the scorer counts unknown ids
/// toward the selection size.
pub async fn resolve_condition_id(service: &EvidenceService, raw: &str) -> anyhow::Result<i64> {
    match parse_condition_ref(raw) {
        ConditionRef::Id(id) => Ok(id),
        ConditionRef::Name(name) => service
            .resolve_condition(name)
            .await?
            .map(|condition| condition.id)
            .ok_or_else(|| {
                anyhow::anyhow!("unknown condition '{name}' (run `ortho conditions` for the list)")
            }),
    }
}

pub async fn resolve_condition_ids(
    service: &EvidenceService,
    raw: &[String],
) -> anyhow::Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(raw.len());
    for value in raw.iter().filter(|v| !v.trim().is_empty()) {
        ids.push(resolve_condition_id(service, value).await?);
    }
    Ok(ids)
}
