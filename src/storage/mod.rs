//! # Storage Module
//!
//! Persistence for the single state document. The domain layer only ever
//! talks to `StateStore`, which wraps any `StateStorage` backend — the
//! durable JSON file in production, the in-memory backend in tests.

pub mod json_file;
pub mod memory;
pub mod state_store;
pub mod traits;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use state_store::StateStore;
pub use traits::StateStorage;
