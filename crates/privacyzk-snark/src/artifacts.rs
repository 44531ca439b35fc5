//! Canonical artifact directory layout and size-capped reads (§4.4, §6).
//!
//! `<base>/<statement>/v<schema>/depth-<d>/{vk,pk,public_inputs,proof,instance}.bin`
//!
//! Mirrors `aingle_minimal::quic`'s "validate the length before
//! `read_exact`" discipline: every read here checks the file's size against
//! its cap before loading it into memory, rather than reading unbounded
//! data and rejecting after the fact.

use std::path::{Path, PathBuf};

use crate::error::{Result, SnarkError};

pub const VK_SIZE_CAP: u64 = 1024 * 1024;
pub const PUBLIC_INPUTS_SIZE_CAP: u64 = 64 * 1024;
pub const PROOF_SIZE_CAP: u64 = 4 * 1024;

/// The five canonical artifact paths for one (statement, schema_version,
/// depth) triple.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub vk: PathBuf,
    pub pk: PathBuf,
    pub public_inputs: PathBuf,
    pub proof: PathBuf,
    pub instance: PathBuf,
}

/// Resolve the canonical directory for `(statement, schema_version,
/// depth)` under `base`. Depth is meaningful for `membership`; other
/// statements pass `0`.
pub fn resolve(base: &Path, statement: &str, schema_version: u16, depth: u32) -> ArtifactPaths {
    let dir = base
        .join(statement)
        .join(format!("v{schema_version}"))
        .join(format!("depth-{depth}"));
    ArtifactPaths {
        vk: dir.join("vk.bin"),
        pk: dir.join("pk.bin"),
        public_inputs: dir.join("public_inputs.bin"),
        proof: dir.join("proof.bin"),
        instance: dir.join("instance.bin"),
    }
}

/// Read `path` into memory, rejecting it before the read if its on-disk
/// size exceeds `cap`. A missing file is a [`SnarkError::ConfigurationError`],
/// not a panic — artifact absence is an expected, recoverable condition.
pub fn read_capped(path: &Path, cap: u64) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SnarkError::ConfigurationError(format!("artifact not found: {}", path.display()))
        } else {
            SnarkError::Io(e)
        }
    })?;
    if metadata.len() > cap {
        return Err(SnarkError::SizeLimitError(format!(
            "{} is {} bytes, exceeds cap of {cap}",
            path.display(),
            metadata.len()
        )));
    }
    std::fs::read(path).map_err(SnarkError::Io)
}
