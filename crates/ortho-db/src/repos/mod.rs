//! Repository modules for the record store.
//!
//! Each module adds methods to `EvidenceService` via `impl EvidenceService`
//! blocks. Derived-table writers take a [`crate::unit_of_work::UnitOfWork`]
//! so that a synthesis run replaces every table atomically.

pub mod condition;
pub mod economic;
pub mod finding;
pub mod record;
pub mod risk_profile;
pub mod scenario;
pub mod timing_benefit;
pub mod treatment_effect;
