//! JSON Schemas for the import boundary and every CLI response type.
//!
//! Schemas are generated from ortho-core types with [`schemars::schema_for!`]
//! and checked with `jsonschema`.

use std::collections::BTreeMap;

use schemars::schema_for;
use thiserror::Error;

use ortho_core::entities::{
    AgeRiskProfile, DentalCondition, EconomicImpact, EconomicImpactView, Finding, FutureScenario,
    NecessityScoreResult, ResearchRecord, TimingBenefit, TreatmentEffect,
};
use ortho_core::import::ImportRecord;
use ortho_core::responses::{ImportSummary, RegenerateSummary, ResetResponse};

pub const IMPORT_RECORD: &str = "import_record";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema not found: {0} (run `ortho schema --list`)")]
    NotFound(String),

    #[error("Validation failed: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    #[error("Schema generation error: {0}")]
    Generation(String),
}

pub struct SchemaRegistry {
    schemas: BTreeMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty))
                .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?,
        );
    };
}

impl SchemaRegistry {
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = BTreeMap::new();

        register!(schemas, IMPORT_RECORD, ImportRecord);

        register!(schemas, "research_record", ResearchRecord);
        register!(schemas, "finding", Finding);
        register!(schemas, "dental_condition", DentalCondition);
        register!(schemas, "age_risk_profile", AgeRiskProfile);
        register!(schemas, "treatment_effect", TreatmentEffect);
        register!(schemas, "timing_benefit", TimingBenefit);
        register!(schemas, "future_scenario", FutureScenario);
        register!(schemas, "economic_impact", EconomicImpact);

        register!(schemas, "economic_impact_view", EconomicImpactView);
        register!(schemas, "necessity_score", NecessityScoreResult);
        register!(schemas, "import_summary", ImportSummary);
        register!(schemas, "regenerate_summary", RegenerateSummary);
        register!(schemas, "reset_response", ResetResponse);

        Ok(Self { schemas })
    }

    pub fn get(&self, name: &str) -> Result<&serde_json::Value, SchemaError> {
        self.schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    /// Validate a JSON value against a named schema.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let validator = jsonschema::validator_for(self.get(name)?)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    pub fn list(&self) -> Vec<&'static str> {
        self.schemas.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{IMPORT_RECORD, SchemaError, SchemaRegistry};

    #[test]
    fn registers_import_and_response_types() {
        let registry = SchemaRegistry::new().unwrap();
        let names = registry.list();
        assert_eq!(names.len(), 14);
        assert!(names.contains(&IMPORT_RECORD));
        assert!(names.contains(&"necessity_score"));
    }

    #[test]
    fn loose_import_lines_are_valid() {
        let registry = SchemaRegistry::new().unwrap();
        for line in [
            json!({"title": "Crowding and caries", "sample_size": 120}),
            json!({"sample_size": "不明", "keywords": ["crowding"]}),
            json!({"issue": "受け口", "abstract": "Adults were followed for 5 years."}),
            json!({}),
        ] {
            registry.validate(IMPORT_RECORD, &line).unwrap();
        }
    }

    #[test]
    fn mistyped_import_fields_are_rejected() {
        let registry = SchemaRegistry::new().unwrap();
        let err = registry
            .validate(IMPORT_RECORD, &json!({"title": "A", "publication_year": "2020"}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { .. }));

        let err = registry
            .validate(IMPORT_RECORD, &json!({"keywords": "crowding"}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { .. }));
    }

    #[test]
    fn serialized_entities_match_their_schemas() {
        let registry = SchemaRegistry::new().unwrap();
        let score = ortho_synth::scoring::fallback();
        registry
            .validate("necessity_score", &serde_json::to_value(score).unwrap())
            .unwrap();

        for impact in ortho_synth::aggregate::economic_impacts() {
            registry
                .validate("economic_impact", &serde_json::to_value(impact).unwrap())
                .unwrap();
        }
    }

    #[test]
    fn unknown_schema_name() {
        let registry = SchemaRegistry::new().unwrap();
        assert!(matches!(
            registry.get("patient"),
            Err(SchemaError::NotFound(name)) if name == "patient"
        ));
    }
}
