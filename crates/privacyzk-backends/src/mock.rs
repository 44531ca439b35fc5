//! Deterministic mock backend: structurally-valid proofs for tests only.
//!
//! Grounded on the Python `MockZKProofSystemAdapter`: it exposes the full
//! `ProofBackend` interface but never performs real cryptography. Per the
//! Open Questions note in the distilled spec, this is compiled only under
//! test or the explicit `mock-backend` feature so a production build cannot
//! link it in.

use privacyzk_core::envelope::{PublicInputValue, ProofType};
use privacyzk_core::{ProofContext, ZkProof};
use std::collections::BTreeMap;

use crate::backend::{BackendInfo, ProofBackend, Witness};
use crate::error::Result;

/// A stand-in backend whose verification is a minimal envelope check
/// (proof-type, commitment length, schema markers), not a cryptographic
/// one. Never selectable by the factory in a production build.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockBackend;

const MOCK_COMMITMENT_LEN: usize = 32;

impl ProofBackend for MockBackend {
    fn generate_proof(&self, ctx: &ProofContext, witness: &Witness) -> Result<ZkProof> {
        let proof_type = match witness {
            Witness::Opening { .. } => ProofType::CommitmentOpening,
            Witness::Membership { .. } => ProofType::AnonymitySetMembership,
            Witness::Unlinkability { .. } => ProofType::SessionUnlinkability,
            Witness::Continuity { .. } => ProofType::IdentityContinuity,
        };

        let mut hasher_input = Vec::new();
        hasher_input.extend_from_slice(witness.statement_name().as_bytes());
        hasher_input.extend_from_slice(&ctx.hash());
        let commitment = {
            use sha2::{Digest, Sha256};
            let mut hasher = Sha256::new();
            hasher.update(&hasher_input);
            hasher.finalize().to_vec()
        };
        debug_assert_eq!(commitment.len(), MOCK_COMMITMENT_LEN);

        let mut public_inputs = BTreeMap::new();
        public_inputs.insert("adapter".into(), PublicInputValue::Str("mock".into()));
        public_inputs.insert("v".into(), PublicInputValue::U64(1));
        public_inputs.insert(
            "statement_type".into(),
            PublicInputValue::Str(witness.statement_name().into()),
        );

        Ok(ZkProof {
            proof_type,
            commitment,
            challenge: [0u8; 32],
            response: Vec::new(),
            public_inputs,
            timestamp: None,
        })
    }

    fn verify_proof(&self, proof: &ZkProof, _ctx: &ProofContext) -> bool {
        if proof.commitment.len() != MOCK_COMMITMENT_LEN {
            return false;
        }
        matches!(
            proof.public_inputs.get("adapter"),
            Some(PublicInputValue::Str(s)) if s == "mock"
        ) && matches!(
            proof.public_inputs.get("v"),
            Some(PublicInputValue::U64(1))
        )
    }

    fn get_backend_info(&self) -> BackendInfo {
        BackendInfo {
            name: "MockZKProofSystemAdapter",
            version: "0.1.0",
            statements: &["membership", "unlinkability", "continuity", "commitment_opening"],
            security_mock_only: true,
        }
    }
}
