//! Domain models for the progress and safety state engine

pub mod badge;
pub mod profile;
pub mod progress;

pub use badge::{badge_definition, topic_master_badge_id, Badge, BadgeCategory, BadgeDefinition, BADGE_CATALOG};
pub use profile::Profile;
pub use progress::{
    AppState, ChildProgress, LessonProgress, SafetySettings, Session, Topic, DEFAULT_WEEKLY_GOAL,
    LESSONS_PER_TOPIC, SCHEMA_VERSION,
};
