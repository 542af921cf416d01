use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;

/// Hex-encoded SHA-256 of a file's bytes.
///
/// Only ever compared for equality: a before/after mismatch is how the engine
/// learns that the formatter rewrote a file, since its exit status says
/// nothing about that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads `path` as raw bytes and fingerprints it.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read {} for fingerprinting", path.display()))?;
    Ok(Fingerprint::of_bytes(&bytes))
}
