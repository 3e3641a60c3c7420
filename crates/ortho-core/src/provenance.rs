//! Provenance markers for derived evidence rows.
//!
//! Every derived row is backed either by a set of research record ids or by
//! the literal `default` marker when a fixed fallback produced it. Record ids
//! are kept sorted and unique so that regenerated tables are reproducible.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::errors::CoreError;

/// Storage marker for rows produced without literature backing.
pub const DEFAULT_MARKER: &str = "default";

/// Source of a derived value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Produced by a fixed fallback formula or table.
    Default,
    /// Aggregated from these research records (sorted, unique).
    Records(Vec<i64>),
}

impl Provenance {
    /// Build provenance from contributing record ids. An empty set collapses to
    /// [`Provenance::Default`].
    pub fn from_records<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        let unique: BTreeSet<i64> = ids.into_iter().collect();
        if unique.is_empty() {
            Self::Default
        } else {
            Self::Records(unique.into_iter().collect())
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Encode for a TEXT column: `default` or comma-joined ids.
    #[must_use]
    pub fn to_column(&self) -> String {
        match self {
            Self::Default => DEFAULT_MARKER.to_string(),
            Self::Records(ids) => ids
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Decode a TEXT column written by [`Provenance::to_column`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidProvenance` if any id is not an integer.
    pub fn parse_column(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() || raw == DEFAULT_MARKER {
            return Ok(Self::Default);
        }
        let ids = raw
            .split(',')
            .map(|part| part.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| CoreError::InvalidProvenance(raw.to_string()))?;
        Ok(Self::from_records(ids))
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_column())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_records_sorts_and_dedups() {
        let provenance = Provenance::from_records([7, 3, 7, 1]);
        assert_eq!(provenance, Provenance::Records(vec![1, 3, 7]));
        assert_eq!(provenance.to_column(), "1,3,7");
    }

    #[test]
    fn empty_records_collapse_to_default() {
        assert_eq!(Provenance::from_records([]), Provenance::Default);
        assert_eq!(Provenance::Default.to_column(), "default");
    }

    #[test]
    fn parse_column_reads_both_forms() {
        assert_eq!(Provenance::parse_column("default").unwrap(), Provenance::Default);
        assert_eq!(
            Provenance::parse_column("4, 2").unwrap(),
            Provenance::Records(vec![2, 4])
        );
        assert!(Provenance::parse_column("4,x").is_err());
    }
}
