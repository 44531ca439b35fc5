//! Fixture artifact resolution for [`crate::provider::FixtureProvider`].
//!
//! Grounded on the Python `assets.py`: a canonical directory layout per
//! statement/schema/depth, with hard size caps enforced before the bytes
//! are handed to a caller. Unlike the Python original this resolver keeps
//! only the canonical layout — no legacy filename fallback chains.

use std::path::{Path, PathBuf};

use crate::constants::{MAX_PROOF_BYTES, MAX_PUBLIC_INPUTS_BYTES};
use crate::error::{Result, WireError};

const VK_SIZE_CAP: usize = 1 << 20;

/// Resolved fixture file paths for one `(statement, schema_v, depth)` triple.
#[derive(Debug, Clone)]
pub struct FixturePaths {
    pub public_inputs: PathBuf,
    pub proof: PathBuf,
}

/// Resolves and reads fixture proof material from `<base>/<statement>/v<schema_v>/depth-<d>/`.
#[derive(Debug, Clone)]
pub struct AssetsResolver {
    base: PathBuf,
}

impl AssetsResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        AssetsResolver { base: base.into() }
    }

    /// Resolve the `(public_inputs, proof)` file paths for a `(statement,
    /// schema_v, depth)` triple without reading them.
    pub fn layout(&self, statement_type: &str, schema_v: u64, depth: u64) -> FixturePaths {
        let dir = self
            .base
            .join(statement_type)
            .join(format!("v{schema_v}"))
            .join(format!("depth-{depth}"));
        FixturePaths {
            public_inputs: dir.join("public_inputs.bin"),
            proof: dir.join("proof.bin"),
        }
    }

    /// Read the `(public_inputs, proof)` fixture pair, rejecting oversized
    /// files before loading them fully into memory.
    pub fn load(&self, statement_type: &str, schema_v: u64, depth: u64) -> Result<(Vec<u8>, Vec<u8>)> {
        let paths = self.layout(statement_type, schema_v, depth);
        let public_inputs = read_capped(&paths.public_inputs, MAX_PUBLIC_INPUTS_BYTES)?;
        let proof = read_capped(&paths.proof, MAX_PROOF_BYTES)?;
        Ok((public_inputs, proof))
    }

    /// Read the fixture verification key, if the layout carries one.
    pub fn load_vk(&self, statement_type: &str, schema_v: u64, depth: u64) -> Result<Vec<u8>> {
        let dir = self
            .base
            .join(statement_type)
            .join(format!("v{schema_v}"))
            .join(format!("depth-{depth}"));
        read_capped(&dir.join("vk.bin"), VK_SIZE_CAP)
    }
}

fn read_capped(path: &Path, cap: usize) -> Result<Vec<u8>> {
    let meta = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            WireError::ConfigurationError(format!("fixture artifact missing: {}", path.display()))
        } else {
            WireError::Io(e)
        }
    })?;
    if meta.len() as usize > cap {
        return Err(WireError::SizeLimitError(format!(
            "fixture artifact {} exceeds size cap",
            path.display()
        )));
    }
    std::fs::read(path).map_err(WireError::Io)
}
