//! Backend selection configuration.
//!
//! Grounded on the Python `feature_flags.py`/`factory.py` pair: selection is
//! resolved in a fixed precedence order and an invalid name at any stage is
//! a configuration error, never a silent fallback.

use std::env;
use std::str::FromStr;

use crate::error::{BackendError, Result};

/// Environment variable read as the third-precedence backend hint.
pub const BACKEND_ENV_VAR: &str = "PRIVACY_PROTOCOL_BACKEND";

/// The closed set of backend names the factory can resolve to.
///
/// `Full` names a future SNARK-backed production backend (the Python
/// source's own registry carries it as a `# future:` comment); resolving to
/// `Full` today is a configuration error, not a silent fallback to a weaker
/// backend, since no variant implements it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Mock,
    Pedersen,
    Full,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Mock => "mock",
            BackendKind::Pedersen => "pedersen",
            BackendKind::Full => "full",
        }
    }
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mock" => Ok(BackendKind::Mock),
            "pedersen" => Ok(BackendKind::Pedersen),
            "full" => Ok(BackendKind::Full),
            other => Err(BackendError::ConfigurationError(format!(
                "invalid backend name {other:?}, valid options: mock, pedersen, full"
            ))),
        }
    }
}

/// Configuration the factory reads to select a backend and (for backends
/// that read fixtures) the artifact base directory.
#[derive(Debug, Clone)]
pub struct PrivacyConfig {
    /// Explicit runtime override; highest precedence, set by a caller that
    /// wants to force a specific backend regardless of environment.
    pub override_backend: Option<BackendKind>,
    /// An artifact base directory consumed by fixture-backed providers.
    pub artifact_base_dir: Option<String>,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        PrivacyConfig {
            override_backend: None,
            artifact_base_dir: None,
        }
    }
}

/// Resolve the backend to select, in precedence order: explicit override →
/// explicit "prefer" hint → `PRIVACY_PROTOCOL_BACKEND` environment variable →
/// default (`mock`).
pub fn resolve_backend_kind(config: &PrivacyConfig, prefer: Option<&str>) -> Result<BackendKind> {
    if let Some(kind) = config.override_backend {
        return Ok(kind);
    }
    if let Some(prefer) = prefer {
        if !prefer.is_empty() {
            return BackendKind::from_str(prefer);
        }
    }
    if let Ok(env_value) = env::var(BACKEND_ENV_VAR) {
        if !env_value.is_empty() {
            return BackendKind::from_str(&env_value);
        }
    }
    Ok(BackendKind::Mock)
}
