//! Error types for the SNARK verification facade and artifact resolver.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnarkError>;

/// Errors surfaced by `privacyzk-snark`. Note that the public `verify()`
/// facade never returns one of these — per §4.6, verification failures are
/// always collapsed to `false` at the boundary. These variants exist for
/// artifact resolution, which legitimately needs to distinguish "missing
/// file" from "size cap breached" from "malformed header".
#[derive(Debug, Error)]
pub enum SnarkError {
    /// Unknown (statement, schema_version) pair, or a public-inputs header
    /// whose fields do not match the table.
    #[error("schema error: {0}")]
    SchemaError(String),

    /// An artifact file exceeds its configured size cap, or a frame/field
    /// would if read in full.
    #[error("size limit exceeded: {0}")]
    SizeLimitError(String),

    /// Missing artifact file, or any other directory-resolution failure.
    /// Per §4.4, "file missing" is a schema error, not a crash — this
    /// variant exists so callers resolving artifacts get a typed reason;
    /// `verify()` itself still collapses it to `false`.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
