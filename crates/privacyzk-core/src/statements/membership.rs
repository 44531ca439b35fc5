//! Anonymity-set membership (§4.2.1): prove a committed identity is a leaf
//! of a published Merkle root, without revealing which leaf.

use std::collections::BTreeMap;

use k256::Scalar;

use crate::context::ProofContext;
use crate::envelope::{PublicInputValue, ProofType, ZkProof};
use crate::group::{decode_point, encode_point, GroupParams};
use crate::primitives::{self, schnorr_prove_with_domain, schnorr_verify_with_domain, Commitment};
use crate::statements::merkle::{fold_path, leaf_hash, MerklePath};

const MEMBERSHIP_CHALLENGE_V1: &[u8] = b"MEMBERSHIP_CHALLENGE_V1";

/// Witness for a membership proof: the opening of the committed leaf and
/// its authentication path in the anonymity-set tree.
pub struct MembershipWitness {
    pub value: Scalar,
    pub commitment: Commitment,
    pub path: MerklePath,
}

/// Generate a membership proof that `commitment` is a leaf under `root`.
///
/// The challenge binds the root, the commitment, the announcement and the
/// context hash, so the proof cannot be replayed against a different root
/// or context; the authentication path itself is carried in
/// `public_inputs` rather than inside the Schnorr transcript.
pub fn prove(
    params: &GroupParams,
    root: [u8; 32],
    witness: &MembershipWitness,
    ctx: &ProofContext,
) -> ZkProof {
    let challenge_domain = membership_domain(&root, &witness.commitment.to_bytes());
    let sub_proof = schnorr_prove_with_domain(
        params,
        &witness.commitment,
        witness.value,
        ctx,
        &challenge_domain,
    );

    let mut public_inputs = BTreeMap::new();
    public_inputs.insert("statement_type".into(), PublicInputValue::Str("membership".into()));
    public_inputs.insert("statement_version".into(), PublicInputValue::U64(2));
    public_inputs.insert("root".into(), PublicInputValue::Bytes(root.to_vec()));
    public_inputs.insert(
        "commitment".into(),
        PublicInputValue::Bytes(witness.commitment.to_bytes().to_vec()),
    );
    public_inputs.insert("ctx_hash".into(), PublicInputValue::Bytes(ctx.hash().to_vec()));
    public_inputs.insert("auth_path".into(), PublicInputValue::Bytes(encode_path(&witness.path)));

    let mut response = Vec::with_capacity(64);
    response.extend_from_slice(&sub_proof.response_v);
    response.extend_from_slice(&sub_proof.response_b);

    ZkProof {
        proof_type: ProofType::AnonymitySetMembership,
        commitment: sub_proof.announcement.to_vec(),
        challenge: sub_proof.challenge,
        response,
        public_inputs,
        timestamp: None,
    }
}

/// Verify a membership proof: re-fold the authentication path to the
/// claimed root, then check the Schnorr sub-proof.
pub fn verify(params: &GroupParams, proof: &ZkProof, root: [u8; 32], ctx: &ProofContext) -> bool {
    if proof.proof_type != ProofType::AnonymitySetMembership {
        return false;
    }
    let Some(PublicInputValue::Bytes(commitment_bytes)) = proof.public_inputs.get("commitment") else {
        return false;
    };
    let Some(PublicInputValue::Bytes(path_bytes)) = proof.public_inputs.get("auth_path") else {
        return false;
    };
    let Some(path) = decode_path(path_bytes) else {
        return false;
    };
    if commitment_bytes.len() != 33 || proof.commitment.len() != 33 || proof.response.len() != 64 {
        return false;
    }

    let leaf = leaf_hash(commitment_bytes);
    let folded_root = fold_path(leaf, &path);
    if folded_root != root {
        tracing::debug!(
            expected = %hex::encode(root),
            folded = %hex::encode(folded_root),
            "membership verify: folded auth path does not match claimed root"
        );
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

    let challenge_domain = membership_domain(&root, &commitment_arr);
    schnorr_verify_with_domain(params, &commitment_arr, &sub_proof, ctx, &challenge_domain)
}

fn membership_domain(root: &[u8; 32], commitment: &[u8; 33]) -> Vec<u8> {
    let mut domain = Vec::with_capacity(MEMBERSHIP_CHALLENGE_V1.len() + 32 + 33);
    domain.extend_from_slice(MEMBERSHIP_CHALLENGE_V1);
    domain.extend_from_slice(root);
    domain.extend_from_slice(commitment);
    domain
}

fn encode_path(path: &MerklePath) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + path.0.len() * 33);
    out.push(path.0.len() as u8);
    for step in &path.0 {
        out.push(step.is_left_sibling as u8);
        out.extend_from_slice(&step.sibling);
    }
    out
}

fn decode_path(bytes: &[u8]) -> Option<MerklePath> {
    if bytes.is_empty() {
        return None;
    }
    let len = bytes[0] as usize;
    let mut steps = Vec::with_capacity(len);
    let mut offset = 1;
    for _ in 0..len {
        if offset + 33 > bytes.len() {
            return None;
        }
        let is_left_sibling = bytes[offset] != 0;
        let mut sibling = [0u8; 32];
        sibling.copy_from_slice(&bytes[offset + 1..offset + 33]);
        steps.push(crate::statements::merkle::PathStep {
            sibling,
            is_left_sibling,
        });
        offset += 33;
    }
    Some(MerklePath(steps))
}
