//! Process-wide curve parameters.
//!
//! `GroupParams` is the re-architected "ambient global curve parameters"
//! pattern: a lazily-initialized, immutable singleton holding the generators
//! and group order, constructed once and handed out by reference. Tests may
//! still build independent instances; nothing here is `static mut`.

use std::sync::OnceLock;

use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, Scalar};
use sha3::{Digest, Sha3_256};

/// Domain separator for deriving the second Pedersen generator `H`.
pub const GENERATOR_H_SEED: &[u8] = b"LIBP2P_PRIVACY_V1_GENERATOR_H";

/// A point on the secp256k1 curve, serialized as a 33-byte SEC1 compressed
/// encoding. This is the wire-level representation used everywhere a
/// commitment or announcement crosses a boundary.
pub type CompressedPoint = [u8; 33];

/// A scalar modulo the group order `q`, serialized as 32-byte big-endian.
pub type ScalarBytes = [u8; 32];

/// Curve parameters shared by every primitive operation: the two
/// independent generators and the group order.
#[derive(Debug, Clone, Copy)]
pub struct GroupParams {
    g: ProjectivePoint,
    h: ProjectivePoint,
}

static PARAMS: OnceLock<GroupParams> = OnceLock::new();

impl GroupParams {
    /// The process-wide singleton, initialized on first access.
    pub fn global() -> &'static GroupParams {
        PARAMS.get_or_init(GroupParams::derive)
    }

    /// Build parameters from scratch. Exposed for tests that want an
    /// instance independent of the process-wide singleton; the result is
    /// always identical because `H` is derived deterministically.
    pub fn derive() -> Self {
        let g = ProjectivePoint::GENERATOR;
        let h = hash_to_curve(GENERATOR_H_SEED, b"");
        GroupParams { g, h }
    }

    /// The curve's standard generator.
    pub fn g(&self) -> ProjectivePoint {
        self.g
    }

    /// The nothing-up-my-sleeve second generator.
    pub fn h(&self) -> ProjectivePoint {
        self.h
    }
}

/// Encode a point as a 33-byte SEC1 compressed point.
pub fn encode_point(point: &ProjectivePoint) -> CompressedPoint {
    let encoded = point.to_affine().to_encoded_point(true);
    let bytes = encoded.as_bytes();
    let mut out = [0u8; 33];
    out.copy_from_slice(bytes);
    out
}

/// Decode a 33-byte SEC1 compressed point, validating curve membership and
/// subgroup order. Any malformed input yields `None`; callers must treat
/// that as a verification reject, never propagate a panic.
pub fn decode_point(bytes: &CompressedPoint) -> Option<ProjectivePoint> {
    let point = k256::AffinePoint::from_bytes((&bytes[..]).into()).into_option()?;
    let projective = ProjectivePoint::from(point);
    if projective.is_identity().into() {
        return None;
    }
    Some(projective)
}

/// Encode a scalar as 32-byte big-endian.
pub fn encode_scalar(scalar: &Scalar) -> ScalarBytes {
    let bytes = scalar.to_bytes();
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    out
}

/// Decode a 32-byte big-endian scalar, reducing into `[0, q)`.
pub fn decode_scalar(bytes: &ScalarBytes) -> Scalar {
    Scalar::reduce_bytes((&bytes[..]).into())
}

/// `hash_to_scalar(domain, data, q)`: SHA3-256 over length-prefixed
/// `domain || data`, reduced modulo the group order.
///
/// Fiat-Shamir challenges must never be derived from a length-extendable
/// hash; SHA3-256 (a sponge construction) is used instead of SHA-256 for
/// exactly this reason.
pub fn hash_to_scalar(domain: &[u8], data: &[u8]) -> Scalar {
    let mut hasher = Sha3_256::new();
    absorb_length_prefixed(&mut hasher, domain);
    absorb_length_prefixed(&mut hasher, data);
    let digest = hasher.finalize();
    Scalar::reduce_bytes((&digest[..]).into())
}

/// `hash_to_curve(domain, seed) -> Point`: a deterministic, verifiable
/// nothing-up-my-sleeve point derivation. Uses try-and-increment over
/// SHA3-256 output interpreted as an x-coordinate candidate, which is
/// adequate for a one-time generator derivation (this is not called on any
/// hot path).
pub fn hash_to_curve(domain: &[u8], seed: &[u8]) -> ProjectivePoint {
    for counter in 0u32..1 << 16 {
        let mut hasher = Sha3_256::new();
        absorb_length_prefixed(&mut hasher, domain);
        absorb_length_prefixed(&mut hasher, seed);
        hasher.update(counter.to_be_bytes());
        let digest = hasher.finalize();

        let mut candidate = [0u8; 33];
        candidate[0] = 0x02;
        candidate[1..].copy_from_slice(&digest);
        if let Some(point) = decode_point(&candidate) {
            return point;
        }
    }
    unreachable!("hash_to_curve exhausted candidate space for a 256-bit field");
}

fn absorb_length_prefixed(hasher: &mut Sha3_256, field: &[u8]) {
    hasher.update((field.len() as u64).to_be_bytes());
    hasher.update(field);
}
