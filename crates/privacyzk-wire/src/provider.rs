//! Proof providers: where a responder actually gets `(public_inputs, proof)`
//! bytes from, once a [`crate::messages::ProofRequest`] has validated.
//!
//! Grounded on the Python `provider.py`'s three provider classes: a fixture
//! replay provider for tests and demos, a real-prover provider behind a
//! pluggable trait (the actual circuit/SNARK machinery is an external
//! collaborator, §1 Non-goals), and a hybrid provider that prefers the real
//! one and falls back to fixtures, recording why in `meta`.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::assets::AssetsResolver;
use crate::constants::SNARK_SCHEMA_V;
use crate::error::{Result, WireError};
use crate::messages::ProofRequest;

/// A CBOR-map-friendly scalar for building response `meta` without hand
/// rolling CBOR encoding.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Str(String),
    Bool(bool),
    U64(u64),
}

pub type Meta = BTreeMap<String, MetaValue>;

/// Output of a successful provider call: raw public inputs and proof bytes,
/// plus any metadata the responder should attach to the `ProofResponse`.
#[derive(Debug, Clone)]
pub struct ProvidedProof {
    pub public_inputs: Vec<u8>,
    pub proof: Vec<u8>,
    pub meta: Meta,
}

/// Supplies `(public_inputs, proof)` bytes for a validated request.
#[async_trait]
pub trait ProofProvider: Send + Sync {
    async fn get_proof(&self, req: &ProofRequest) -> Result<ProvidedProof>;
}

/// Replays pre-generated fixture artifacts. Used in tests and in
/// environments where real circuit generation is unavailable.
pub struct FixtureProvider {
    resolver: AssetsResolver,
}

impl FixtureProvider {
    pub fn new(base_dir: impl Into<std::path::PathBuf>) -> Self {
        FixtureProvider { resolver: AssetsResolver::new(base_dir) }
    }
}

#[async_trait]
impl ProofProvider for FixtureProvider {
    async fn get_proof(&self, req: &ProofRequest) -> Result<ProvidedProof> {
        let (public_inputs, proof) = self.resolver.load(&req.t, req.schema_v, req.d)?;
        let paths = self.resolver.layout(&req.t, req.schema_v, req.d);
        let mut meta = Meta::new();
        meta.insert("prove_mode".into(), MetaValue::Str("fixture".into()));
        meta.insert("statement".into(), MetaValue::Str(req.t.clone()));
        meta.insert("schema_v".into(), MetaValue::U64(req.schema_v));
        meta.insert("depth".into(), MetaValue::U64(req.d));
        meta.insert(
            "public_inputs_path".into(),
            MetaValue::Str(paths.public_inputs.display().to_string()),
        );
        meta.insert("proof_path".into(), MetaValue::Str(paths.proof.display().to_string()));
        Ok(ProvidedProof { public_inputs, proof, meta })
    }
}

/// Generates proof material with a real, externally supplied prover.
///
/// `RealProver` is the seam where an actual SNARK/circuit implementation
/// plugs in; this crate never constructs one itself.
#[async_trait]
pub trait RealProver: Send + Sync {
    async fn prove(&self, req: &ProofRequest) -> Result<(Vec<u8>, Vec<u8>)>;
}

pub struct RealProvider<P: RealProver> {
    prover: P,
}

impl<P: RealProver> RealProvider<P> {
    pub fn new(prover: P) -> Self {
        RealProvider { prover }
    }
}

#[async_trait]
impl<P: RealProver> ProofProvider for RealProvider<P> {
    async fn get_proof(&self, req: &ProofRequest) -> Result<ProvidedProof> {
        let (public_inputs, proof) = self.prover.prove(req).await?;
        let mut meta = Meta::new();
        meta.insert("prove_mode".into(), MetaValue::Str("real".into()));
        Ok(ProvidedProof { public_inputs, proof, meta })
    }
}

/// Prefers the real provider; on failure, falls back to the fixture
/// provider and annotates the response `meta` with the fallback reason —
/// never silently swaps proof material without recording it.
pub struct HybridProvider<P: RealProver> {
    real: RealProvider<P>,
    fixture: FixtureProvider,
    strict: bool,
}

impl<P: RealProver> HybridProvider<P> {
    /// `strict = true` disables fallback: a real-prover failure is
    /// surfaced as an error rather than masked by a fixture reply.
    pub fn new(prover: P, fixture_base_dir: impl Into<std::path::PathBuf>, strict: bool) -> Self {
        HybridProvider {
            real: RealProvider::new(prover),
            fixture: FixtureProvider::new(fixture_base_dir),
            strict,
        }
    }
}

#[async_trait]
impl<P: RealProver> ProofProvider for HybridProvider<P> {
    async fn get_proof(&self, req: &ProofRequest) -> Result<ProvidedProof> {
        match self.real.get_proof(req).await {
            Ok(provided) => Ok(provided),
            Err(real_err) if self.strict => Err(real_err),
            Err(real_err) => {
                tracing::warn!(error = %real_err, "real prover failed, falling back to fixture");
                let mut provided = self.fixture.get_proof(req).await?;
                provided.meta.insert("fallback_from".into(), MetaValue::Str("real".into()));
                provided.meta.insert("real_error".into(), MetaValue::Str(real_err.to_string()));
                Ok(provided)
            }
        }
    }
}

/// Sanity-checks that a provider's output still matches the request it was
/// asked to satisfy, independent of provider-internal bugs.
pub fn validate_provided(req: &ProofRequest, provided: &ProvidedProof) -> Result<()> {
    if req.schema_v != SNARK_SCHEMA_V {
        return Err(WireError::SchemaError("unsupported schema_v".into()));
    }
    if provided.public_inputs.is_empty() || provided.proof.is_empty() {
        return Err(WireError::ProofGenerationError("provider returned empty proof material".into()));
    }
    Ok(())
}
