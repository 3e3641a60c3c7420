//! Entity structs for all domain objects.
//!
//! Base entities (records, conditions, findings) map to the base tables of the
//! record store; derived entities map to tables that are regenerated wholesale
//! by each synthesis run. All structs derive `Serialize`, `Deserialize` and
//! `JsonSchema`.

mod condition;
mod economic;
mod finding;
mod necessity;
mod record;
mod risk_profile;
mod scenario;
mod timing_benefit;
mod treatment_effect;

pub use condition::DentalCondition;
pub use economic::{EconomicImpact, EconomicImpactView};
pub use finding::Finding;
pub use necessity::NecessityScoreResult;
pub use record::ResearchRecord;
pub use risk_profile::{AgeRiskProfile, RISK_TYPE_TOOTH_LOSS};
pub use scenario::FutureScenario;
pub use timing_benefit::TimingBenefit;
pub use treatment_effect::TreatmentEffect;
