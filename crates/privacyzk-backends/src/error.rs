//! Error types for backend selection, the statement registry, and proof
//! generation/verification at the backend layer.

use thiserror::Error;

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors surfaced by `privacyzk-backends`.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Invalid backend name, or a selected backend with no implementation
    /// (e.g. `full`, reserved but not yet backed by a SNARK prover).
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// A decoded `public_inputs` map is missing a required field, has the
    /// wrong type, or declares a `statement_version` the registry does not
    /// recognize.
    #[error("schema error: {0}")]
    SchemaError(String),

    /// Nonce generation, serialization, or internal prove failure.
    #[error("proof generation failed: {0}")]
    ProofGenerationError(String),

    /// Propagated from `privacyzk-core`.
    #[error(transparent)]
    Core(#[from] privacyzk_core::CoreError),
}
