//! Error types for ortho-synth.

/// Errors raised when a caller-supplied label cannot be mapped onto the fixed
/// vocabularies. Pattern misses are not errors; they yield `None`.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Unknown study type: {0}")]
    UnknownStudyType(String),

    #[error("Unknown evidence tier: {0}")]
    UnknownTier(String),
}

/// Errors that make a necessity score meaningless.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Age {0} is outside 1..=100")]
    AgeOutOfRange(u32),

    #[error("Non-finite {component} score")]
    NonFinite { component: &'static str },

    #[error("Risk value {0} is outside 0..=100")]
    InvalidRisk(f64),
}
