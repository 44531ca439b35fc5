//! # privacyzk-core
//!
//! Domain-separated cryptographic primitives and statement constructions
//! for the privacy-proof subsystem.
//!
//! ## Layout
//!
//! - [`group`] / [`primitives`]: curve parameters, randomness, hashing,
//!   Pedersen commitments, Schnorr proofs of knowledge (C1).
//! - [`context`]: the session context every proof binds to.
//! - [`envelope`]: the `ZKProof` wire-adjacent envelope.
//! - [`statements`]: anonymity-set membership, session unlinkability,
//!   identity continuity, and the commitment-opening PoK, plus the Merkle
//!   tree helper they share (C2).
//!
//! ## Security
//!
//! Blindings and witness scalars must never be logged or persisted.
//! Verification failures return `false`; they never panic the caller.

pub mod context;
pub mod envelope;
pub mod error;
pub mod group;
pub mod primitives;
pub mod statements;

pub use context::ProofContext;
pub use envelope::{ProofType, PublicInputValue, ZkProof};
pub use error::{CoreError, Result};
pub use group::GroupParams;
pub use primitives::{commit, commit_with_blinding, schnorr_prove, schnorr_verify, Commitment, SchnorrOpeningProof};
