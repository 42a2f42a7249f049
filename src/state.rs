//! Persisted digest record
//!
//! The tracked digest lives in one small text file holding exactly the hex
//! string, nothing else. The file is absent until the first successful run.
//! The external scheduler owns committing the file back to storage.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads and writes the digest recorded by the previous successful run.
#[derive(Debug, Clone)]
pub struct DigestStore {
    path: PathBuf,
}

impl DigestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the recorded digest, or `None` on the first run.
    ///
    /// A missing file is the valid first-run state, not an error. Surrounding
    /// whitespace is trimmed so a trailing newline from a manual edit does
    /// not defeat the comparison.
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let digest = contents.trim();
                if digest.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(digest.to_string()))
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read digest file {}", self.path.display())),
        }
    }

    /// Overwrites the recorded digest with `digest`.
    ///
    /// The value is written to a sibling temp file and renamed into place so
    /// a crash mid-write cannot leave a half-written record behind.
    pub fn save(&self, digest: &str) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, digest)
            .with_context(|| format!("failed to write digest file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace digest file {}", self.path.display()))?;
        Ok(())
    }
}
