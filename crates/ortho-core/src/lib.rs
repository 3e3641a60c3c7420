//! # ortho-core
//!
//! Core domain types and error types for orthodontic evidence synthesis.
//!
//! This crate provides the foundational types shared across all crates:
//! - Entity structs for literature records, findings and reference conditions
//! - Derived evidence table rows (risk profiles, treatment effects, timing,
//!   future scenarios, economic impacts)
//! - Ordered enums for evidence tiers, effect categories and directions
//! - Provenance markers linking derived rows back to source records
//! - The import record accepted at the ingestion boundary
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod import;
pub mod provenance;
pub mod responses;
