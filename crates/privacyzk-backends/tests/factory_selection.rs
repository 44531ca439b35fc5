//! Cross-module scenarios for backend selection and the Pedersen backend,
//! exercised through the public crate surface rather than `#[cfg(test)]`
//! module internals.

use k256::Scalar;
use privacyzk_backends::{BackendKind, PrivacyConfig, ProofBackend, ProofBackendKind, Witness};
use privacyzk_core::primitives::{commit_with_blinding, random_scalar};
use privacyzk_core::statements::merkle::MerkleTree;
use privacyzk_core::{GroupParams, ProofContext};

fn fresh_env() {
    std::env::remove_var(privacyzk_backends::BACKEND_ENV_VAR);
}

#[test]
fn env_var_selects_pedersen_when_no_override_or_prefer() {
    fresh_env();
    std::env::set_var(privacyzk_backends::BACKEND_ENV_VAR, "pedersen");
    let config = PrivacyConfig::default();
    let backend = ProofBackendKind::select(&config, None).unwrap();
    assert_eq!(backend.backend_name(), "Pedersen+Schnorr");
    std::env::remove_var(privacyzk_backends::BACKEND_ENV_VAR);
}

#[test]
fn override_beats_env_var() {
    fresh_env();
    std::env::set_var(privacyzk_backends::BACKEND_ENV_VAR, "full");
    let config = PrivacyConfig {
        override_backend: Some(BackendKind::Pedersen),
        artifact_base_dir: None,
    };
    let backend = ProofBackendKind::select(&config, None).unwrap();
    assert_eq!(backend.backend_name(), "Pedersen+Schnorr");
    std::env::remove_var(privacyzk_backends::BACKEND_ENV_VAR);
}

#[test]
fn pedersen_backend_rejects_tampered_membership_root() {
    let params = GroupParams::derive();
    let backend = ProofBackendKind::select(
        &PrivacyConfig::default(),
        Some("pedersen"),
    )
    .unwrap();

    let ctx = ProofContext::new("peer-9", "session-9");
    let values: Vec<Scalar> = (1..=4u64).map(Scalar::from).collect();
    let blindings: Vec<Scalar> = (0..4).map(|_| random_scalar()).collect();
    let commitments: Vec<_> = values
        .iter()
        .zip(&blindings)
        .map(|(v, r)| commit_with_blinding(&params, *v, *r))
        .collect();
    let leaves: Vec<Vec<u8>> = commitments.iter().map(|c| c.to_bytes().to_vec()).collect();
    let tree = MerkleTree::build(2, &leaves);

    let witness = Witness::Membership {
        value: values[2],
        commitment: commitments[2],
        root: tree.root(),
        path: tree.path(2),
    };
    let proof = backend.generate_proof(&ctx, &witness).unwrap();
    assert!(backend.verify_proof(&proof, &ctx));

    // Tamper with the published root in the proof's public inputs: the
    // membership check must fail even though the Schnorr sub-proof alone
    // would still verify.
    let mut tampered = proof;
    if let Some(privacyzk_core::PublicInputValue::Bytes(root)) =
        tampered.public_inputs.get_mut("root")
    {
        root[0] ^= 0xff;
    }
    assert!(!backend.verify_proof(&tampered, &ctx));
}

#[test]
fn batch_verify_rejects_if_any_single_proof_is_bad() {
    let params = GroupParams::derive();
    let backend = ProofBackendKind::select(&PrivacyConfig::default(), Some("pedersen")).unwrap();

    let ctx = ProofContext::new("peer-1", "s1");
    let good_commitment = commit_with_blinding(&params, Scalar::from(3u64), Scalar::from(30u64));
    let good_witness = Witness::Opening {
        value: Scalar::from(3u64),
        commitment: good_commitment,
    };
    let good_proof = backend.generate_proof(&ctx, &good_witness).unwrap();

    let bad_commitment = commit_with_blinding(&params, Scalar::from(4u64), Scalar::from(40u64));
    let bad_witness = Witness::Opening {
        value: Scalar::from(4u64),
        commitment: bad_commitment,
    };
    let mut bad_proof = backend.generate_proof(&ctx, &bad_witness).unwrap();
    bad_proof.challenge[0] ^= 0xff;

    let batch = vec![(good_proof, ctx.clone()), (bad_proof, ctx.clone())];
    assert!(!backend.batch_verify(&batch));
}
