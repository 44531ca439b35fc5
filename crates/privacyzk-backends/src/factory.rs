//! Backend factory: resolve a `BackendKind` to a live `ProofBackend`.
//!
//! Grounded on `aingle_minimal::storage_factory::DynamicStorage`: a closed
//! enum wrapping each backend variant, `#[cfg]`-gated where the variant is
//! feature-conditional, with a delegating `ProofBackend` impl. This replaces
//! the Python source's `BACKEND_REGISTRY` dict and `importlib`-based dynamic
//! loading — there is nothing to import, every variant here is known at
//! compile time.

use privacyzk_core::{ProofContext, ZkProof};

use crate::backend::{BackendInfo, ProofBackend, Witness};
use crate::config::{resolve_backend_kind, BackendKind, PrivacyConfig};
use crate::error::{BackendError, Result};
use crate::pedersen::PedersenBackend;

#[cfg(any(test, feature = "mock-backend"))]
use crate::mock::MockBackend;

/// A backend selected at runtime, holding the concrete implementation
/// rather than dispatching through a trait object.
pub enum ProofBackendKind {
    #[cfg(any(test, feature = "mock-backend"))]
    Mock(MockBackend),
    Pedersen(PedersenBackend),
}

impl ProofBackendKind {
    /// Resolve and construct the backend named by `config`/`prefer`/the
    /// environment, in that precedence order. `full` is a recognized name
    /// but has no implementing variant yet, so it always resolves to a
    /// `ConfigurationError`.
    pub fn select(config: &PrivacyConfig, prefer: Option<&str>) -> Result<Self> {
        let kind = resolve_backend_kind(config, prefer)?;
        tracing::debug!(backend = kind.as_str(), "resolved proof backend");
        Self::from_kind(kind)
    }

    fn from_kind(kind: BackendKind) -> Result<Self> {
        match kind {
            #[cfg(any(test, feature = "mock-backend"))]
            BackendKind::Mock => Ok(ProofBackendKind::Mock(MockBackend)),
            #[cfg(not(any(test, feature = "mock-backend")))]
            BackendKind::Mock => {
                tracing::warn!("mock backend selected in a build without the mock-backend feature");
                Err(BackendError::ConfigurationError(
                    "mock backend selected but this build was not compiled with the mock-backend feature".into(),
                ))
            }
            BackendKind::Pedersen => Ok(ProofBackendKind::Pedersen(PedersenBackend::new())),
            BackendKind::Full => {
                tracing::warn!("backend 'full' requested but has no implementing variant yet");
                Err(BackendError::ConfigurationError(
                    "backend 'full' is reserved for a future SNARK-backed implementation".into(),
                ))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.get_backend_info().name
    }
}

impl ProofBackend for ProofBackendKind {
    fn generate_proof(&self, ctx: &ProofContext, witness: &Witness) -> Result<ZkProof> {
        match self {
            #[cfg(any(test, feature = "mock-backend"))]
            ProofBackendKind::Mock(b) => b.generate_proof(ctx, witness),
            ProofBackendKind::Pedersen(b) => b.generate_proof(ctx, witness),
        }
    }

    fn verify_proof(&self, proof: &ZkProof, ctx: &ProofContext) -> bool {
        match self {
            #[cfg(any(test, feature = "mock-backend"))]
            ProofBackendKind::Mock(b) => b.verify_proof(proof, ctx),
            ProofBackendKind::Pedersen(b) => b.verify_proof(proof, ctx),
        }
    }

    fn batch_verify(&self, proofs: &[(ZkProof, ProofContext)]) -> bool {
        match self {
            #[cfg(any(test, feature = "mock-backend"))]
            ProofBackendKind::Mock(b) => b.batch_verify(proofs),
            ProofBackendKind::Pedersen(b) => b.batch_verify(proofs),
        }
    }

    fn get_backend_info(&self) -> BackendInfo {
        match self {
            #[cfg(any(test, feature = "mock-backend"))]
            ProofBackendKind::Mock(b) => b.get_backend_info(),
            ProofBackendKind::Pedersen(b) => b.get_backend_info(),
        }
    }
}
