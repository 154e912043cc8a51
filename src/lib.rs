//! # FunLearn Core
//!
//! Progress and safety state engine for the FunLearn kids learning app:
//! learner profiles, lesson completion, streaks, badges, session time, and
//! parental safety limits, all derived from one persisted `AppState`
//! document.
//!
//! The UI layers (screens, content banks, narration, the parent-login
//! gate) consume this crate's services and contain no state logic of their
//! own. Every mutating operation here is one whole-document
//! load-mutate-save cycle; there is exactly one writer at a time and no
//! background tasks.

use anyhow::Result;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use domain::{
    DomainError, FeedbackService, ProfileService, ProgressService, SafetyService, SessionService,
};
pub use storage::{JsonFileStorage, MemoryStorage, StateStore, StateStorage};

/// Main backend struct that orchestrates all services over one shared
/// state store
pub struct Backend<S: StateStorage> {
    pub profile_service: ProfileService<S>,
    pub progress_service: ProgressService<S>,
    pub session_service: SessionService<S>,
    pub safety_service: SafetyService<S>,
    pub feedback_service: FeedbackService<S>,
}

impl<S: StateStorage> Backend<S> {
    /// Create a backend over the given storage backend
    pub fn new(storage: S) -> Self {
        let store = StateStore::new(Arc::new(storage));
        Self {
            profile_service: ProfileService::new(store.clone()),
            progress_service: ProgressService::new(store.clone()),
            session_service: SessionService::new(store.clone()),
            safety_service: SafetyService::new(store.clone()),
            feedback_service: FeedbackService::new(store),
        }
    }
}

impl Backend<JsonFileStorage> {
    /// Create a backend persisting to the default per-user data directory
    pub fn new_default() -> Result<Self> {
        Ok(Self::new(JsonFileStorage::new_default()?))
    }
}
