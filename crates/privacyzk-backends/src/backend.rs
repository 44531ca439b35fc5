//! The `ProofBackend` capability abstraction (§4.3).
//!
//! Re-architected per REDESIGN FLAGS as a typed witness sum instead of the
//! Python source's untyped `witness: dict`/`public_inputs: dict` pair —
//! each statement carries exactly the fields its proof needs, and the
//! backend dispatches on the variant rather than inspecting string keys at
//! runtime.

use privacyzk_core::statements::merkle::MerklePath;
use privacyzk_core::{Commitment, ProofContext, ZkProof};
use k256::Scalar;

use crate::error::Result;

/// The witness for one of the four proof constructions a backend may be
/// asked to generate.
pub enum Witness {
    /// Commitment-opening PoK: "anonymity_set_membership (claim-only)".
    Opening { value: Scalar, commitment: Commitment },
    /// Anonymity-set membership, bound to a published Merkle root.
    Membership {
        value: Scalar,
        commitment: Commitment,
        root: [u8; 32],
        path: MerklePath,
    },
    /// Session unlinkability.
    Unlinkability { value: Scalar, commitment: Commitment },
    /// Identity continuity across two independently-blinded commitments.
    Continuity {
        value: Scalar,
        commitment_1: Commitment,
        commitment_2: Commitment,
        blinding_1: Scalar,
        blinding_2: Scalar,
    },
}

impl Witness {
    pub fn statement_name(&self) -> &'static str {
        match self {
            Witness::Opening { .. } => "commitment_opening",
            Witness::Membership { .. } => "membership",
            Witness::Unlinkability { .. } => "unlinkability",
            Witness::Continuity { .. } => "continuity",
        }
    }
}

/// Diagnostic information about a backend instance, returned by
/// `get_backend_info`.
#[derive(Debug, Clone)]
pub struct BackendInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub statements: &'static [&'static str],
    /// `true` for backends that provide no real cryptographic guarantee
    /// (the mock adapter); `false` for the Pedersen/Schnorr backend.
    pub security_mock_only: bool,
}

/// The capability set every proof backend exposes: generate a proof for a
/// witness, verify a single proof, verify a batch, and report diagnostic
/// info. `batch_verify` sequential verification is explicitly permitted by
/// the spec; no backend here is required to do anything smarter.
pub trait ProofBackend {
    fn generate_proof(&self, ctx: &ProofContext, witness: &Witness) -> Result<ZkProof>;
    fn verify_proof(&self, proof: &ZkProof, ctx: &ProofContext) -> bool;

    /// Sequential verification of a batch; overridable by a backend that
    /// can do better, but no caller may assume anything stronger than
    /// "every element passed `verify_proof`".
    fn batch_verify(&self, proofs: &[(ZkProof, ProofContext)]) -> bool {
        proofs.iter().all(|(proof, ctx)| self.verify_proof(proof, ctx))
    }

    fn get_backend_info(&self) -> BackendInfo;
}
