//! Privacy-preserving zero-knowledge proof toolkit.
//!
//! Re-exports the four inner crates behind one dependency:
//!
//! - [`mod@core`] — domain-separated Pedersen/Schnorr/Merkle primitives and
//!   the statement constructions built on them.
//! - [`backends`] — the `ProofBackend` trait, the Pedersen+Schnorr backend,
//!   and the configuration-driven backend factory.
//! - [`snark`] — the table-driven facade over externally produced SNARK
//!   verification artifacts.
//! - [`wire`] — the length-prefixed CBOR request/response protocol.

pub use privacyzk_backends as backends;
pub use privacyzk_core as core;
pub use privacyzk_snark as snark;
pub use privacyzk_wire as wire;

pub use privacyzk_backends::{BackendInfo, PrivacyConfig, ProofBackend, ProofBackendKind, Witness};
pub use privacyzk_core::{Commitment, GroupParams, ProofContext, ZkProof};
pub use privacyzk_snark::{verify as verify_snark_artifact, VerifierRegistry};
pub use privacyzk_wire::{request_proof, FixtureProvider, ProofRequest, ProofResponse};
