//! Typed domain error conditions.
//!
//! Services return `anyhow::Result`; conditions a caller may want to react
//! to (missing profile, bad session index) are raised as `DomainError` so
//! they stay matchable via `Error::downcast_ref` instead of disappearing
//! into a silent no-op.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Profile name cannot be empty")]
    InvalidName,

    #[error("Session {session_index} not found for profile {profile_id}")]
    SessionNotFound {
        profile_id: String,
        session_index: usize,
    },

    #[error("Session {session_index} for profile {profile_id} is already closed")]
    SessionAlreadyClosed {
        profile_id: String,
        session_index: usize,
    },
}
