//! Commitment-opening proof of knowledge: a bare Schnorr PoK of `(v, r)`
//! opening a Pedersen commitment, used by the real-ZK CLI helper. This is
//! not a membership proof — the envelope is marked `claim_only = true` so a
//! downstream consumer never infers a Merkle root from it (see Open
//! Questions in DESIGN.md).

use std::collections::BTreeMap;

use k256::Scalar;

use crate::context::ProofContext;
use crate::envelope::{PublicInputValue, ProofType, ZkProof};
use crate::group::{decode_point, GroupParams};
use crate::primitives::{self, schnorr_prove_with_domain, schnorr_verify_with_domain, Commitment};

const COMMITMENT_OPENING_POK_V1: &[u8] = b"LIBP2P_PRIVACY_V1_COMMITMENT_OPENING_POK";

/// Generate a commitment-opening proof of knowledge for `commitment`.
pub fn prove(params: &GroupParams, value: Scalar, commitment: &Commitment, ctx: &ProofContext) -> ZkProof {
    let sub_proof = schnorr_prove_with_domain(params, commitment, value, ctx, COMMITMENT_OPENING_POK_V1);

    let mut public_inputs = BTreeMap::new();
    public_inputs.insert(
        "statement_type".into(),
        PublicInputValue::Str("anonymity_set_membership".into()),
    );
    public_inputs.insert("statement_version".into(), PublicInputValue::U64(1));
    public_inputs.insert("claim_only".into(), PublicInputValue::Bool(true));
    public_inputs.insert(
        "commitment".into(),
        PublicInputValue::Bytes(commitment.to_bytes().to_vec()),
    );
    public_inputs.insert("ctx_hash".into(), PublicInputValue::Bytes(ctx.hash().to_vec()));

    let mut response = Vec::with_capacity(64);
    response.extend_from_slice(&sub_proof.response_v);
    response.extend_from_slice(&sub_proof.response_b);

    ZkProof {
        proof_type: ProofType::CommitmentOpening,
        commitment: sub_proof.announcement.to_vec(),
        challenge: sub_proof.challenge,
        response,
        public_inputs,
        timestamp: None,
    }
}

/// Verify a commitment-opening proof.
pub fn verify(params: &GroupParams, proof: &ZkProof, ctx: &ProofContext) -> bool {
    if proof.proof_type != ProofType::CommitmentOpening || !proof.is_claim_only() {
        return false;
    }
    let Some(PublicInputValue::Bytes(commitment_bytes)) = proof.public_inputs.get("commitment") else {
        return false;
    };
    if commitment_bytes.len() != 33 || proof.commitment.len() != 33 || proof.response.len() != 64 {
        return false;
    }

    let mut commitment_arr = [0u8; 33];
    commitment_arr.copy_from_slice(commitment_bytes);
    if decode_point(&commitment_arr).is_none() {
        return false;
    }

    let mut announcement = [0u8; 33];
    announcement.copy_from_slice(&proof.commitment);
    let mut response_v = [0u8; 32];
    response_v.copy_from_slice(&proof.response[..32]);
    let mut response_b = [0u8; 32];
    response_b.copy_from_slice(&proof.response[32..]);

    let sub_proof = primitives::SchnorrOpeningProof {
        announcement,
        challenge: proof.challenge,
        response_v,
        response_b,
    };

    schnorr_verify_with_domain(params, &commitment_arr, &sub_proof, ctx, COMMITMENT_OPENING_POK_V1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_proof_verifies_and_rejects_single_byte_flips() {
        let params = GroupParams::derive();
        let value = Scalar::from(7u64);
        let commitment = primitives::commit(&params, value);
        let ctx = ProofContext::new("peer-1", "s1");
        let proof = prove(&params, value, &commitment, &ctx);
        assert!(verify(&params, &proof, &ctx));

        let mut bad_commitment = proof.clone();
        bad_commitment.public_inputs.insert(
            "commitment".into(),
            PublicInputValue::Bytes({
                let mut bytes = commitment.to_bytes().to_vec();
                *bytes.last_mut().unwrap() ^= 0xFF;
                bytes
            }),
        );
        assert!(!verify(&params, &bad_commitment, &ctx));

        let mut bad_challenge = proof.clone();
        bad_challenge.challenge[31] ^= 0xFF;
        assert!(!verify(&params, &bad_challenge, &ctx));

        let mut bad_response = proof;
        bad_response.response[0] ^= 0xFF;
        assert!(!verify(&params, &bad_response, &ctx));
    }
}
