//! Length-prefixed CBOR proof-exchange protocol (`/privacyzk/1.0.0`).
//!
//! Wires together request/response schemas ([`messages`]), framing
//! ([`framing`]) over an abstract [`stream::Stream`], proof material
//! providers ([`provider`]), and the responder/client halves of the
//! protocol ([`handler`], [`client`]).

pub mod assets;
pub mod client;
pub mod constants;
pub mod error;
pub mod framing;
pub mod handler;
pub mod messages;
pub mod provider;
pub mod stream;

pub use client::request_proof;
pub use constants::{PROTOCOL_ID, STATEMENT_TYPES};
pub use error::{Result, WireError};
pub use handler::{handle_proof_request_bytes, handle_proof_stream};
pub use messages::{decode_request, decode_response, encode_request, encode_response, ProofRequest, ProofResponse};
pub use provider::{FixtureProvider, HybridProvider, Meta, MetaValue, ProofProvider, ProvidedProof, RealProvider, RealProver};
pub use stream::{Stream, StreamOpener};
