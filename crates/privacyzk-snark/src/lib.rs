//! # privacyzk-snark
//!
//! A typed, table-driven facade over externally-generated SNARK proof
//! artifacts (C4). This crate never performs a pairing check itself — the
//! SNARK circuits are an explicit external collaborator (§1 Non-goals) —
//! it only pins the schema table, validates public-inputs headers, resolves
//! the canonical artifact layout under size caps, and dispatches to a
//! caller-registered [`verify::VerifierEntryPoint`].
//!
//! ## Layout
//!
//! - [`schema`]: the `(statement, schema_version)` table.
//! - [`header`]: public-inputs header validation for both header formats.
//! - [`artifacts`]: canonical directory layout and size-capped reads.
//! - [`verify`]: the public `verify()` facade and the verifier registry.

pub mod artifacts;
pub mod error;
pub mod header;
pub mod schema;
pub mod verify;

pub use error::{Result, SnarkError};
pub use schema::SchemaInfo;
pub use verify::{verify, verify_from_artifacts, VerifierEntryPoint, VerifierRegistry};
