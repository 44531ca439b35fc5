//! Error types for framing, message codecs, and the responder/client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WireError>;

/// Errors surfaced by `privacyzk-wire`. Per §4.6, none of these ever reach
/// a peer directly — the responder collapses them into a `ProofResponse`
/// with `ok=false` and a short `err` string before writing a frame.
#[derive(Debug, Error)]
pub enum WireError {
    /// Malformed message, unsupported statement/schema/depth, nonce out of
    /// bounds, or a decoded CBOR payload missing a required field.
    #[error("schema error: {0}")]
    SchemaError(String),

    /// A frame or field exceeds its configured size cap.
    #[error("size limit exceeded: {0}")]
    SizeLimitError(String),

    /// Fixture artifact resolution failure (missing directory/file).
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// The real provider's prover callback returned an error, or no prover
    /// was configured.
    #[error("proof generation failed: {0}")]
    ProofGenerationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation timed out")]
    Timeout(#[from] tokio::time::error::Elapsed),

    #[error("CBOR encode error: {0}")]
    CborEncode(String),

    #[error("CBOR decode error: {0}")]
    CborDecode(String),
}
