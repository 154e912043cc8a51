//! In-memory storage backend, used by service tests and available to any
//! embedder that wants a throwaway state (the domain layer is storage
//! agnostic, same discipline as swapping CSV for SQL elsewhere).

use anyhow::Result;
use std::sync::{Arc, Mutex};

use crate::storage::traits::StateStorage;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.document.lock().unwrap().clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        *self.document.lock().unwrap() = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.read().unwrap().is_none());
        storage.write(b"abc").unwrap();
        assert_eq!(storage.read().unwrap().unwrap(), b"abc");
    }

    #[test]
    fn test_clones_share_the_document() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        storage.write(b"shared").unwrap();
        assert_eq!(clone.read().unwrap().unwrap(), b"shared");
    }
}
