//! Cross-cutting error types.
//!
//! Domain-specific errors (`DatabaseError`, `ScoringError`, `ConfigError`) are
//! defined in their respective crates and converge into `anyhow` at the binary.

use thiserror::Error;

/// Errors raised while decoding core value types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stored provenance column could not be decoded.
    #[error("Invalid provenance '{0}'")]
    InvalidProvenance(String),
}
