//! Session unlinkability (§4.2.2): a deterministic tag ties a commitment to
//! a session context without revealing the committed identity, and distinct
//! contexts always yield distinct tags.

use std::collections::BTreeMap;

use k256::elliptic_curve::Field;
use k256::Scalar;
use sha2::{Digest, Sha256};

use crate::context::ProofContext;
use crate::envelope::{PublicInputValue, ProofType, ZkProof};
use crate::group::{decode_point, GroupParams};
use crate::primitives::{self, schnorr_prove_with_domain, schnorr_verify_with_domain, Commitment};

const UNLINKABILITY_TAG_V1: &[u8] = b"UNLINKABILITY_TAG_V1";
const UNLINKABILITY_CHALLENGE_V1: &[u8] = b"UNLINKABILITY_CHALLENGE_V1";

/// Compute the deterministic session tag `T = SHA256(TAG_V1 || ctx_hash || C)`.
pub fn session_tag(ctx: &ProofContext, commitment: &Commitment) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(UNLINKABILITY_TAG_V1);
    hasher.update(ctx.hash());
    hasher.update(commitment.to_bytes());
    hasher.finalize().into()
}

/// Generate an unlinkability proof for `commitment` under `ctx`. The caller
/// is responsible for drawing a fresh blinding per session — reusing a
/// blinding across contexts is a caller error this proof cannot detect.
pub fn prove(params: &GroupParams, value: Scalar, commitment: &Commitment, ctx: &ProofContext) -> ZkProof {
    let tag = session_tag(ctx, commitment);
    let domain = unlinkability_domain(&tag);
    let sub_proof = schnorr_prove_with_domain(params, commitment, value, ctx, &domain);

    let mut public_inputs = BTreeMap::new();
    public_inputs.insert(
        "statement_type".into(),
        PublicInputValue::Str("unlinkability".into()),
    );
    public_inputs.insert("statement_version".into(), PublicInputValue::U64(2));
    public_inputs.insert("tag".into(), PublicInputValue::Bytes(tag.to_vec()));
    public_inputs.insert(
        "commitment".into(),
        PublicInputValue::Bytes(commitment.to_bytes().to_vec()),
    );
    public_inputs.insert("ctx_hash".into(), PublicInputValue::Bytes(ctx.hash().to_vec()));

    let mut response = Vec::with_capacity(64);
    response.extend_from_slice(&sub_proof.response_v);
    response.extend_from_slice(&sub_proof.response_b);

    ZkProof {
        proof_type: ProofType::SessionUnlinkability,
        commitment: sub_proof.announcement.to_vec(),
        challenge: sub_proof.challenge,
        response,
        public_inputs,
        timestamp: None,
    }
}

/// Verify: recompute the tag from `(commitment, ctx)`, then check the
/// Schnorr sub-proof under the tag-bound domain.
pub fn verify(params: &GroupParams, proof: &ZkProof, ctx: &ProofContext) -> bool {
    if proof.proof_type != ProofType::SessionUnlinkability {
        return false;
    }
    let Some(PublicInputValue::Bytes(commitment_bytes)) = proof.public_inputs.get("commitment") else {
        return false;
    };
    let Some(PublicInputValue::Bytes(tag_bytes)) = proof.public_inputs.get("tag") else {
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

    let commitment = Commitment {
        point: decode_point(&commitment_arr).unwrap(),
        blinding: Scalar::ZERO,
    };
    let expected_tag = session_tag(ctx, &commitment);
    if expected_tag.as_slice() != tag_bytes.as_slice() {
        tracing::debug!("unlinkability verify: recomputed tag does not match claimed tag");
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

    let domain = unlinkability_domain(&expected_tag);
    schnorr_verify_with_domain(params, &commitment_arr, &sub_proof, ctx, &domain)
}

fn unlinkability_domain(tag: &[u8; 32]) -> Vec<u8> {
    let mut domain = Vec::with_capacity(UNLINKABILITY_CHALLENGE_V1.len() + 32);
    domain.extend_from_slice(UNLINKABILITY_CHALLENGE_V1);
    domain.extend_from_slice(tag);
    domain
}
