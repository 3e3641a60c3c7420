//! # ortho-synth
//!
//! Pure evidence synthesis for orthodontic literature. No I/O happens here:
//! callers hand in a snapshot of findings and reference tables and receive
//! derived rows back.
//!
//! - [`extract`]: free-text signals (effect value, direction, age range,
//!   study type, sample size, confidence interval, condition)
//! - [`enrich`]: fills the gaps of an imported record using [`extract`]
//! - [`weighting`]: evidence tier to aggregation weight
//! - [`aggregate`]: the five derived tables
//! - [`narrative`]: Japanese narrative text for derived rows
//! - [`scoring`]: composite treatment-necessity score

pub mod aggregate;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod narrative;
pub mod scoring;
pub mod weighting;

pub use aggregate::{EvidenceSnapshot, SynthesisOutput, WeightedFinding, synthesize};
pub use error::{ExtractionError, ScoringError};
