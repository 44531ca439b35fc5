//! The real Pedersen/Schnorr backend: implements all three §4.2 statements
//! plus the commitment-opening PoK, over the `privacyzk-core` primitives.

use privacyzk_core::envelope::ProofType;
use privacyzk_core::statements::{continuity, membership, opening, unlinkability};
use privacyzk_core::statements::continuity::ContinuityWitness;
use privacyzk_core::statements::membership::MembershipWitness;
use privacyzk_core::{GroupParams, ProofContext, ZkProof};

use crate::backend::{BackendInfo, ProofBackend, Witness};
use crate::error::{BackendError, Result};

/// Backend over `privacyzk-core`'s Pedersen commitments and Schnorr proofs.
/// Holds the process-wide curve parameters by reference; constructing one
/// is free (no per-instance state beyond that reference).
#[derive(Debug, Clone, Copy)]
pub struct PedersenBackend {
    params: &'static GroupParams,
}

impl Default for PedersenBackend {
    fn default() -> Self {
        PedersenBackend::new()
    }
}

impl PedersenBackend {
    pub fn new() -> Self {
        PedersenBackend {
            params: GroupParams::global(),
        }
    }

    /// Generate a commitment-opening proof of knowledge ("anonymity_set_membership
    /// (claim-only)"), the mode used by the real-ZK CLI helper.
    pub fn generate_opening_proof(
        &self,
        ctx: &ProofContext,
        value: k256::Scalar,
        commitment: &privacyzk_core::Commitment,
    ) -> ZkProof {
        opening::prove(self.params, value, commitment, ctx)
    }

    pub fn verify_opening_proof(&self, proof: &ZkProof, ctx: &ProofContext) -> bool {
        opening::verify(self.params, proof, ctx)
    }

    pub fn generate_membership_proof(
        &self,
        ctx: &ProofContext,
        root: [u8; 32],
        witness: &MembershipWitness,
    ) -> ZkProof {
        membership::prove(self.params, root, witness, ctx)
    }

    pub fn verify_membership_proof(&self, proof: &ZkProof, root: [u8; 32], ctx: &ProofContext) -> bool {
        membership::verify(self.params, proof, root, ctx)
    }

    pub fn generate_unlinkability_proof(
        &self,
        ctx: &ProofContext,
        value: k256::Scalar,
        commitment: &privacyzk_core::Commitment,
    ) -> ZkProof {
        unlinkability::prove(self.params, value, commitment, ctx)
    }

    pub fn verify_unlinkability_proof(&self, proof: &ZkProof, ctx: &ProofContext) -> bool {
        unlinkability::verify(self.params, proof, ctx)
    }

    pub fn generate_continuity_proof(
        &self,
        ctx: &ProofContext,
        commitment_1: &privacyzk_core::Commitment,
        commitment_2: &privacyzk_core::Commitment,
        witness: &ContinuityWitness,
    ) -> ZkProof {
        continuity::prove(self.params, commitment_1, commitment_2, witness, ctx)
    }

    pub fn verify_continuity_proof(&self, proof: &ZkProof, ctx: &ProofContext) -> bool {
        continuity::verify(self.params, proof, ctx)
    }
}

impl ProofBackend for PedersenBackend {
    fn generate_proof(&self, ctx: &ProofContext, witness: &Witness) -> Result<ZkProof> {
        match witness {
            Witness::Opening { value, commitment } => {
                Ok(self.generate_opening_proof(ctx, *value, commitment))
            }
            Witness::Membership {
                value,
                commitment,
                root,
                path,
            } => {
                let witness = MembershipWitness {
                    value: *value,
                    commitment: *commitment,
                    path: path.clone(),
                };
                Ok(self.generate_membership_proof(ctx, *root, &witness))
            }
            Witness::Unlinkability { value, commitment } => {
                Ok(self.generate_unlinkability_proof(ctx, *value, commitment))
            }
            Witness::Continuity {
                value,
                commitment_1,
                commitment_2,
                blinding_1,
                blinding_2,
            } => {
                let witness = ContinuityWitness {
                    value: *value,
                    blinding_1: *blinding_1,
                    blinding_2: *blinding_2,
                };
                Ok(self.generate_continuity_proof(ctx, commitment_1, commitment_2, &witness))
            }
        }
    }

    fn verify_proof(&self, proof: &ZkProof, ctx: &ProofContext) -> bool {
        match proof.proof_type {
            ProofType::CommitmentOpening => self.verify_opening_proof(proof, ctx),
            ProofType::AnonymitySetMembership => {
                let Some(root) = extract_root(proof) else {
                    tracing::debug!("pedersen verify: membership proof missing a well-formed root");
                    return false;
                };
                self.verify_membership_proof(proof, root, ctx)
            }
            ProofType::SessionUnlinkability => self.verify_unlinkability_proof(proof, ctx),
            ProofType::IdentityContinuity => self.verify_continuity_proof(proof, ctx),
        }
    }

    fn get_backend_info(&self) -> BackendInfo {
        BackendInfo {
            name: "Pedersen+Schnorr",
            version: "0.1.0",
            statements: &["membership", "unlinkability", "continuity", "commitment_opening"],
            security_mock_only: false,
        }
    }
}

fn extract_root(proof: &ZkProof) -> Option<[u8; 32]> {
    use privacyzk_core::envelope::PublicInputValue;
    match proof.public_inputs.get("root") {
        Some(PublicInputValue::Bytes(bytes)) if bytes.len() == 32 => {
            let mut root = [0u8; 32];
            root.copy_from_slice(bytes);
            Some(root)
        }
        _ => None,
    }
}

/// Validate a decoded `public_inputs` map against the statement registry
/// before acting on a proof from an untrusted peer. Wraps
/// `registry::validate_public_inputs` with the backend-layer error type.
pub fn validate_or_reject(proof: &ZkProof) -> Result<()> {
    crate::registry::validate_public_inputs(proof).map_err(|e| match e {
        crate::error::BackendError::SchemaError(msg) => BackendError::SchemaError(msg),
        other => other,
    })
}
