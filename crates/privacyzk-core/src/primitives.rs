//! Domain-separated, constant-time cryptographic building blocks (C1).
//!
//! Every operation here is deterministic given its inputs except
//! [`random_scalar`] and [`commit`], which draw fresh randomness. Scalars
//! are always reduced into `[0, q)` before a group operation, and point
//! deserialization validates curve membership — a malformed point is a
//! verification reject, never an exception.

use k256::elliptic_curve::Field;
use k256::{ProjectivePoint, Scalar};
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::context::ProofContext;
use crate::group::{decode_point, encode_point, encode_scalar, hash_to_scalar, CompressedPoint, GroupParams, ScalarBytes};

/// Domain separator for the Schnorr opening-proof challenge.
pub const SCHNORR_CHALLENGE_V1: &[u8] = b"SCHNORR_CHALLENGE_V1";

/// Domain separator for the Pedersen commitment itself (not hashed into the
/// commitment value, but recorded here as the tag external tooling uses to
/// label commitment bytes unambiguously).
pub const PEDERSEN_COMMITMENT_V1: &[u8] = b"PEDERSEN_COMMITMENT_V1";

/// Draw a uniformly random scalar in `[1, q)`.
///
/// `OsRng` re-reads system entropy on every call, so no explicit reseed is
/// needed across a `fork()`; [`reseed_after_fork`] exists as a documented
/// no-op hook for hosts that want an explicit call site.
pub fn random_scalar() -> Scalar {
    use k256::elliptic_curve::ops::Reduce;
    loop {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let scalar = Scalar::reduce_bytes((&bytes[..]).into());
        if !bool::from(scalar.is_zero()) {
            return scalar;
        }
    }
}

/// Documented fork-safety hook. `OsRng` does not keep process-global state
/// that a `fork()` could stale, so this is a no-op; it exists so that a
/// host embedding this crate has an explicit call site to audit.
pub fn reseed_after_fork() {}

/// A Pedersen commitment `C = v*G + r*H` together with its blinding.
#[derive(Debug, Clone, Copy)]
pub struct Commitment {
    pub point: ProjectivePoint,
    pub blinding: Scalar,
}

/// `commit(v) -> (C, r)`: draw a fresh blinding and commit to `v`.
pub fn commit(params: &GroupParams, value: Scalar) -> Commitment {
    let r = random_scalar();
    commit_with_blinding(params, value, r)
}

/// Commit to `v` with an explicit blinding, used by verifiers and tests
/// that need a deterministic commitment.
pub fn commit_with_blinding(params: &GroupParams, value: Scalar, blinding: Scalar) -> Commitment {
    let point = params.g() * value + params.h() * blinding;
    Commitment { point, blinding }
}

impl Commitment {
    pub fn to_bytes(&self) -> CompressedPoint {
        encode_point(&self.point)
    }
}

/// A non-interactive Schnorr proof of knowledge of `(v, r)` opening a
/// Pedersen commitment, bound to a context hash via Fiat-Shamir.
#[derive(Debug, Clone, Copy)]
pub struct SchnorrOpeningProof {
    pub announcement: CompressedPoint,
    pub challenge: ScalarBytes,
    pub response_v: ScalarBytes,
    pub response_b: ScalarBytes,
}

/// `schnorr_prove(C, v, r, ctx) -> (A, c, z_v, z_b)`.
///
/// Nonces equal to zero are rejected and redrawn; the challenge binds `G`,
/// `H`, the commitment, the announcement, and the context hash, so a proof
/// cannot be replayed against a different commitment or context.
pub fn schnorr_prove(
    params: &GroupParams,
    commitment: &Commitment,
    value: Scalar,
    ctx: &ProofContext,
) -> SchnorrOpeningProof {
    schnorr_prove_with_domain(params, commitment, value, ctx, SCHNORR_CHALLENGE_V1)
}

/// Generalized Schnorr opening proof allowing a caller-chosen challenge
/// domain separator, so statement constructions in C2 can reuse this
/// routine under their own domain tags.
pub fn schnorr_prove_with_domain(
    params: &GroupParams,
    commitment: &Commitment,
    value: Scalar,
    ctx: &ProofContext,
    domain: &[u8],
) -> SchnorrOpeningProof {
    let k_v = nonzero_scalar();
    let k_b = nonzero_scalar();
    let announcement_point = params.g() * k_v + params.h() * k_b;
    let announcement = encode_point(&announcement_point);

    let ctx_hash = ctx.hash();
    let challenge_input = challenge_transcript(params, &commitment.to_bytes(), &announcement, &ctx_hash);
    let c = hash_to_scalar(domain, &challenge_input);

    let z_v = k_v + c * value;
    let z_b = k_b + c * commitment.blinding;

    SchnorrOpeningProof {
        announcement,
        challenge: encode_scalar(&c),
        response_v: encode_scalar(&z_v),
        response_b: encode_scalar(&z_b),
    }
}

/// `schnorr_verify(C, A, c, z_v, z_b, ctx) -> bool`.
pub fn schnorr_verify(
    params: &GroupParams,
    commitment_bytes: &CompressedPoint,
    proof: &SchnorrOpeningProof,
    ctx: &ProofContext,
) -> bool {
    schnorr_verify_with_domain(params, commitment_bytes, proof, ctx, SCHNORR_CHALLENGE_V1)
}

/// Generalized verifier counterpart to [`schnorr_prove_with_domain`].
pub fn schnorr_verify_with_domain(
    params: &GroupParams,
    commitment_bytes: &CompressedPoint,
    proof: &SchnorrOpeningProof,
    ctx: &ProofContext,
    domain: &[u8],
) -> bool {
    let Some(commitment_point) = decode_point(commitment_bytes) else {
        tracing::debug!("schnorr_verify: commitment point failed to decode");
        return false;
    };
    let Some(announcement_point) = decode_point(&proof.announcement) else {
        tracing::debug!("schnorr_verify: announcement point failed to decode");
        return false;
    };

    let ctx_hash = ctx.hash();
    let challenge_input = challenge_transcript(params, commitment_bytes, &proof.announcement, &ctx_hash);
    let expected_challenge = hash_to_scalar(domain, &challenge_input);
    let expected_challenge_bytes = encode_scalar(&expected_challenge);

    if expected_challenge_bytes.ct_ne(&proof.challenge).into() {
        tracing::debug!("schnorr_verify: challenge does not match transcript");
        return false;
    }

    let z_v = crate::group::decode_scalar(&proof.response_v);
    let z_b = crate::group::decode_scalar(&proof.response_b);
    let c = crate::group::decode_scalar(&proof.challenge);

    let lhs = params.g() * z_v + params.h() * z_b;
    let rhs = announcement_point + commitment_point * c;
    let ok = lhs == rhs;
    if !ok {
        tracing::debug!("schnorr_verify: response does not satisfy the verification equation");
    }
    ok
}

fn challenge_transcript(
    params: &GroupParams,
    commitment: &CompressedPoint,
    announcement: &CompressedPoint,
    ctx_hash: &[u8; 32],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(33 + 33 + 33 + 33 + 32);
    out.extend_from_slice(&encode_point(&params.g()));
    out.extend_from_slice(&encode_point(&params.h()));
    out.extend_from_slice(commitment);
    out.extend_from_slice(announcement);
    out.extend_from_slice(ctx_hash);
    out
}

fn nonzero_scalar() -> Scalar {
    loop {
        let s = random_scalar();
        if !bool::from(s.is_zero()) {
            return s;
        }
    }
}

/// Constant-time equality on two byte-strings of equal length, used for any
/// comparison touching a secret or a Fiat-Shamir challenge.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_and_open_roundtrip() {
        let params = GroupParams::derive();
        let value = Scalar::from(42u64);
        let c = commit(&params, value);
        let reopened = commit_with_blinding(&params, value, c.blinding);
        assert_eq!(c.to_bytes(), reopened.to_bytes());
    }

    #[test]
    fn schnorr_proof_verifies() {
        let params = GroupParams::derive();
        let value = Scalar::from(7u64);
        let c = commit(&params, value);
        let ctx = ProofContext::new("peer-1", "s1");
        let proof = schnorr_prove(&params, &c, value, &ctx);
        assert!(schnorr_verify(&params, &c.to_bytes(), &proof, &ctx));
    }

    #[test]
    fn tampered_challenge_rejects() {
        let params = GroupParams::derive();
        let value = Scalar::from(7u64);
        let c = commit(&params, value);
        let ctx = ProofContext::new("peer-1", "s1");
        let mut proof = schnorr_prove(&params, &c, value, &ctx);
        proof.challenge[31] ^= 0xFF;
        assert!(!schnorr_verify(&params, &c.to_bytes(), &proof, &ctx));
    }

    #[test]
    fn tampered_response_rejects() {
        let params = GroupParams::derive();
        let value = Scalar::from(7u64);
        let c = commit(&params, value);
        let ctx = ProofContext::new("peer-1", "s1");
        let mut proof = schnorr_prove(&params, &c, value, &ctx);
        proof.response_v[0] ^= 0x01;
        assert!(!schnorr_verify(&params, &c.to_bytes(), &proof, &ctx));
    }

    #[test]
    fn tampered_commitment_rejects() {
        let params = GroupParams::derive();
        let value = Scalar::from(7u64);
        let c = commit(&params, value);
        let ctx = ProofContext::new("peer-1", "s1");
        let proof = schnorr_prove(&params, &c, value, &ctx);
        let mut bad_commitment = c.to_bytes();
        bad_commitment[32] ^= 0xFF;
        assert!(!schnorr_verify(&params, &bad_commitment, &proof, &ctx));
    }

    #[test]
    fn wrong_context_rejects() {
        let params = GroupParams::derive();
        let value = Scalar::from(7u64);
        let c = commit(&params, value);
        let ctx1 = ProofContext::new("peer-1", "s1");
        let ctx2 = ProofContext::new("peer-1", "s2");
        let proof = schnorr_prove(&params, &c, value, &ctx1);
        assert!(!schnorr_verify(&params, &c.to_bytes(), &proof, &ctx2));
    }
}
