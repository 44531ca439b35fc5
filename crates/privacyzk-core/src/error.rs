//! Error types for the crypto primitives and statement layer.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by `privacyzk-core`.
///
/// Variants map onto the error kinds of the wider proof subsystem: a
/// cryptographic failure (`CryptographicError`) never panics the caller, and
/// a proof that fails to assemble (`ProofGenerationError`) is distinct from a
/// proof that assembles but fails to verify (verification returns `bool`,
/// never an error).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Curve-parameter invalid, point-not-on-curve, scalar out of range.
    #[error("cryptographic error: {0}")]
    CryptographicError(String),

    /// Nonce generation, serialization, or internal prove failure.
    #[error("proof generation failed: {0}")]
    ProofGenerationError(String),

    /// Malformed witness, public input, or Merkle path.
    #[error("schema error: {0}")]
    SchemaError(String),
}
