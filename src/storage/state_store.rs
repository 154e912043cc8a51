//! # State Store
//!
//! In-memory gateway to the persisted `AppState` document. Every public
//! operation in the domain layer is one `load` (reads) or one `update`
//! (writes): a read-modify-write cycle over the whole document.
//!
//! A missing or corrupt document never surfaces as a caller error; `load`
//! falls back to the empty first-run state and logs what happened. Writes
//! replace the entire document, which is acceptable because the dataset is
//! bounded by the number of local profiles.

use anyhow::Result;
use log::{debug, warn};
use std::sync::{Arc, Mutex};

use crate::domain::errors::DomainError;
use crate::domain::models::progress::{AppState, ChildProgress, SCHEMA_VERSION};
use crate::storage::traits::StateStorage;

#[derive(Debug)]
pub struct StateStore<S: StateStorage> {
    storage: Arc<S>,
    /// Serializes read-modify-write cycles within this process. Concurrent
    /// writers in other processes remain last-write-wins.
    write_lock: Arc<Mutex<()>>,
}

impl<S: StateStorage> Clone for StateStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S: StateStorage> StateStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load the current state, falling back to the empty default when the
    /// document is absent or unreadable, then run the migration step.
    pub fn load(&self) -> AppState {
        let state = match self.storage.read() {
            Ok(Some(bytes)) => match serde_json::from_slice::<AppState>(&bytes) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Persisted state is not parseable ({}), starting from empty state", e);
                    AppState::empty()
                }
            },
            Ok(None) => AppState::empty(),
            Err(e) => {
                warn!("Failed to read persisted state ({}), starting from empty state", e);
                AppState::empty()
            }
        };
        migrate(state)
    }

    /// Serialize and persist the given state unconditionally
    pub fn save(&self, state: &AppState) -> Result<()> {
        let bytes = serde_json::to_vec(state)?;
        self.storage.write(&bytes)
    }

    /// One load → mutate → save cycle. The mutation function either
    /// succeeds (its result is returned and the new state is persisted) or
    /// fails with a `DomainError`, in which case nothing is written and the
    /// previously persisted document stays current.
    pub fn update<R>(&self, f: impl FnOnce(&mut AppState) -> Result<R, DomainError>) -> Result<R> {
        // A writer that panicked mid-mutation never saved, so the
        // persisted document is still consistent; take over its lock
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut state = self.load();
        let result = f(&mut state)?;
        self.save(&state)?;
        Ok(result)
    }
}

/// Migration step run on every load (schema-version redesign): untagged
/// legacy documents get referential integrity repaired and are stamped to
/// the current version. Documents from a future version are used as-is.
fn migrate(mut state: AppState) -> AppState {
    if state.schema_version >= SCHEMA_VERSION {
        if state.schema_version > SCHEMA_VERSION {
            warn!(
                "Persisted state has schema version {} (newer than supported {})",
                state.schema_version, SCHEMA_VERSION
            );
        }
        return state;
    }

    // Version 0: no version tag existed. Every profile must have a paired
    // ChildProgress entry; backfill any that drifted.
    for profile in &state.profiles {
        if !state.children.contains_key(&profile.id) {
            debug!("Backfilling missing progress record for profile {}", profile.id);
            state
                .children
                .insert(profile.id.clone(), ChildProgress::new(&profile.id));
        }
    }
    state.schema_version = SCHEMA_VERSION;
    state
}
