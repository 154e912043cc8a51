//! # Storage Traits
//!
//! Storage abstraction that lets different persistence backends be used
//! interchangeably by the state store. A backend holds exactly one opaque
//! document (the serialized `AppState`) under a fixed key and owns no
//! business logic.

use anyhow::Result;

/// Interface for the single-document persistence backend.
///
/// All operations are synchronous: the engine performs one whole-document
/// read-modify-write per public operation, and the dataset is small and
/// bounded by the number of local profiles.
pub trait StateStorage: Send + Sync {
    /// Read the persisted document, or `None` if nothing was ever written
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the persisted document unconditionally
    fn write(&self, bytes: &[u8]) -> Result<()>;
}
