//! Durable JSON-file storage backend.
//!
//! Persists the state document as a single JSON file under a base
//! directory. Writes go to a temporary file first and are renamed into
//! place, so a crashed write leaves the previous document intact.

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::StateStorage;

/// Fixed file name of the persisted state document
const STATE_FILE_NAME: &str = "funlearn-state.json";

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    base_directory: PathBuf,
}

impl JsonFileStorage {
    /// Create a JSON-file backend rooted at the given base directory,
    /// creating the directory if it does not exist.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
        }
        Ok(Self { base_directory: base_path })
    }

    /// Create a backend in the default per-user data directory
    pub fn new_default() -> Result<Self> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine user data directory"))?
            .join("FunLearn");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn state_path(&self) -> PathBuf {
        self.base_directory.join(STATE_FILE_NAME)
    }
}

impl StateStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read state file {}", path.display()))?;
        Ok(Some(bytes))
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        let path = self.state_path();
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, bytes)
            .with_context(|| format!("Failed to write state file {}", tmp_path.display()))?;

        if let Err(e) = fs::rename(&tmp_path, &path) {
            // Leave no stray temp file behind on a failed rename
            warn!("Failed to move state file into place: {}", e);
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("Failed to replace state file {}", path.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_before_any_write_returns_none() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();
        storage.write(b"{\"profiles\":[]}").unwrap();
        assert_eq!(storage.read().unwrap().unwrap(), b"{\"profiles\":[]}");
    }

    #[test]
    fn test_write_replaces_previous_document() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();
        storage.write(b"first").unwrap();
        storage.write(b"second").unwrap();
        assert_eq!(storage.read().unwrap().unwrap(), b"second");
    }

    #[test]
    fn test_creates_missing_base_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = JsonFileStorage::new(&nested).unwrap();
        assert!(nested.exists());
        storage.write(b"x").unwrap();
        assert!(nested.join(STATE_FILE_NAME).exists());
    }
}
