//! Scenarios S1-S4 (testable properties, §8), exercised through the public
//! crate surface rather than `#[cfg(test)]` module internals.

use k256::Scalar;

use privacyzk_core::primitives::{commit, commit_with_blinding, schnorr_prove, schnorr_verify};
use privacyzk_core::statements::continuity::{self, ContinuityWitness};
use privacyzk_core::statements::membership::{self, MembershipWitness};
use privacyzk_core::statements::merkle::MerkleTree;
use privacyzk_core::statements::unlinkability;
use privacyzk_core::{GroupParams, ProofContext};

/// S1 — commitment-opening PoK verifies, and a single-byte flip in any of
/// {commitment, challenge, response} individually rejects.
#[test]
fn s1_opening_pok_accept_and_single_byte_flips_reject() {
    let params = GroupParams::derive();
    let ctx = ProofContext::new("peer-1", "s1");
    let value = Scalar::from(7u64);
    let commitment = commit(&params, value);

    let proof = schnorr_prove(&params, &commitment, value, &ctx);
    assert!(schnorr_verify(&params, &commitment.to_bytes(), &proof, &ctx));

    let mut bad_commitment = commitment.to_bytes();
    bad_commitment[32] ^= 0xFF;
    assert!(!schnorr_verify(&params, &bad_commitment, &proof, &ctx));

    let mut bad_challenge_proof = proof;
    bad_challenge_proof.challenge[31] ^= 0xFF;
    assert!(!schnorr_verify(&params, &commitment.to_bytes(), &bad_challenge_proof, &ctx));

    let mut bad_response_proof = bad_challenge_proof;
    bad_response_proof.challenge[31] ^= 0xFF; // restore challenge
    bad_response_proof.response_v[0] ^= 0xFF;
    assert!(!schnorr_verify(&params, &commitment.to_bytes(), &bad_response_proof, &ctx));
}

/// S2 — an 8-leaf anonymity set, membership proof for index 3 verifies;
/// tampering the root's last byte rejects.
#[test]
fn s2_membership_happy_path_and_root_tamper() {
    let params = GroupParams::derive();
    let identities: Vec<u64> = (1..=8).collect();
    let blindings: Vec<u64> = (100..=107).collect();
    let commitments: Vec<_> = identities
        .iter()
        .zip(&blindings)
        .map(|(&v, &r)| commit_with_blinding(&params, Scalar::from(v), Scalar::from(r)))
        .collect();
    let leaves: Vec<Vec<u8>> = commitments.iter().map(|c| c.to_bytes().to_vec()).collect();
    let tree = MerkleTree::build(3, &leaves);

    let idx = 3;
    let ctx = ProofContext::new("peer-1", "s1");
    let witness = MembershipWitness {
        value: Scalar::from(identities[idx]),
        commitment: commitments[idx],
        path: tree.path(idx),
    };
    let proof = membership::prove(&params, tree.root(), &witness, &ctx);
    assert!(membership::verify(&params, &proof, tree.root(), &ctx));

    let mut bad_root = tree.root();
    bad_root[31] ^= 0xFF;
    assert!(!membership::verify(&params, &proof, bad_root, &ctx));
}

/// S3 — identity 42 under two distinct contexts with distinct blindings:
/// both proofs verify, tags differ, and swapping ctx between proofs fails
/// both verifications.
#[test]
fn s3_unlinkability_distinctness_and_ctx_swap() {
    let params = GroupParams::derive();
    let value = Scalar::from(42u64);
    let ctx_a = ProofContext::new("peer-1", "session-a");
    let ctx_b = ProofContext::new("peer-1", "session-b");

    let commitment_a = commit_with_blinding(&params, value, Scalar::from(100u64));
    let commitment_b = commit_with_blinding(&params, value, Scalar::from(200u64));

    let proof_a = unlinkability::prove(&params, value, &commitment_a, &ctx_a);
    let proof_b = unlinkability::prove(&params, value, &commitment_b, &ctx_b);

    assert!(unlinkability::verify(&params, &proof_a, &ctx_a));
    assert!(unlinkability::verify(&params, &proof_b, &ctx_b));

    let tag_a = proof_a.public_inputs.get("tag").cloned();
    let tag_b = proof_b.public_inputs.get("tag").cloned();
    assert_ne!(tag_a, tag_b);

    assert!(!unlinkability::verify(&params, &proof_a, &ctx_b));
    assert!(!unlinkability::verify(&params, &proof_b, &ctx_a));
}

/// S4 — identity 42 with two blindings under one context: continuity proof
/// verifies; swapping commitment_1/commitment_2 rejects; replacing the
/// challenge with random bytes rejects.
#[test]
fn s4_continuity_accept_swap_reject_random_challenge_reject() {
    let params = GroupParams::derive();
    let value = Scalar::from(42u64);
    let r1 = Scalar::from(300u64);
    let r2 = Scalar::from(400u64);
    let c1 = commit_with_blinding(&params, value, r1);
    let c2 = commit_with_blinding(&params, value, r2);
    let ctx = ProofContext::new("peer-1", "s1");

    let witness = ContinuityWitness { value, blinding_1: r1, blinding_2: r2 };
    let proof = continuity::prove(&params, &c1, &c2, &witness, &ctx);
    assert!(continuity::verify(&params, &proof, &ctx));

    let mut swapped = proof.clone();
    swapped.public_inputs.insert(
        "commitment_1".into(),
        privacyzk_core::PublicInputValue::Bytes(c2.to_bytes().to_vec()),
    );
    swapped.public_inputs.insert(
        "commitment_2".into(),
        privacyzk_core::PublicInputValue::Bytes(c1.to_bytes().to_vec()),
    );
    assert!(!continuity::verify(&params, &swapped, &ctx));

    let mut random_challenge = proof;
    random_challenge.challenge = [0x99u8; 32];
    assert!(!continuity::verify(&params, &random_challenge, &ctx));
}
