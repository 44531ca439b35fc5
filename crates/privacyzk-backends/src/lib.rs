//! # privacyzk-backends
//!
//! The proof-backend capability abstraction (C3): the `ProofBackend` trait,
//! the statement registry that validates a decoded proof's `public_inputs`
//! against its declared statement, the deterministic mock adapter used only
//! in tests, the real Pedersen/Schnorr backend, and the factory that selects
//! among them.
//!
//! ## Layout
//!
//! - [`backend`]: the `ProofBackend` trait and the typed `Witness` sum.
//! - [`registry`]: compile-time `(statement_type, version)` schema table.
//! - [`config`] / [`factory`]: backend selection precedence and the closed
//!   `ProofBackendKind` enum.
//! - [`pedersen`]: the real backend, built on `privacyzk-core`'s statements.
//! - [`mock`]: a structurally-valid, non-cryptographic stand-in, compiled
//!   only for tests or under the `mock-backend` feature.

pub mod backend;
pub mod config;
pub mod error;
pub mod factory;
#[cfg(any(test, feature = "mock-backend"))]
pub mod mock;
pub mod pedersen;
pub mod registry;

pub use backend::{BackendInfo, ProofBackend, Witness};
pub use config::{BackendKind, PrivacyConfig, BACKEND_ENV_VAR};
pub use error::{BackendError, Result};
pub use factory::ProofBackendKind;
pub use pedersen::PedersenBackend;
pub use registry::{validate_public_inputs, FieldKind, StatementSpec};

#[cfg(any(test, feature = "mock-backend"))]
pub use mock::MockBackend;
