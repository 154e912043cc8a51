//! # Domain Module
//!
//! Business logic for the progress and safety state engine.
//!
//! Each service covers one concern and funnels every mutation through the
//! state store's single load-mutate-save primitive:
//!
//! - **profile_service**: learner profiles and the active-profile pointer
//! - **progress_service**: lesson completions, streaks, badge awards
//! - **session_service**: timed learning sessions and time accounting
//! - **safety_service**: parental daily limits and settings
//! - **feedback_service**: read-only daily summaries for parents
//!
//! Services are UI and storage agnostic: they operate on any
//! `StateStorage` backend and know nothing about screens, content banks,
//! or narration.

pub mod commands;
pub mod errors;
pub mod feedback_service;
pub mod models;
pub mod profile_service;
pub mod progress_service;
pub mod safety_service;
pub mod session_service;

pub use errors::DomainError;
pub use feedback_service::FeedbackService;
pub use profile_service::ProfileService;
pub use progress_service::ProgressService;
pub use safety_service::SafetyService;
pub use session_service::SessionService;
