//! Progress and session models: the per-profile record that every service
//! mutates, plus the root `AppState` aggregate that gets persisted whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::models::badge::Badge;
use crate::domain::models::profile::Profile;

/// Number of lessons in each topic's lesson bank
pub const LESSONS_PER_TOPIC: u32 = 5;

/// Default weekly lesson goal for a new profile
pub const DEFAULT_WEEKLY_GOAL: u32 = 10;

/// The four fixed subject areas. All per-topic data structures are keyed by
/// this same closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Reading,
    Math,
    Culture,
    Geography,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Reading, Topic::Math, Topic::Culture, Topic::Geography];

    /// Lowercase identifier used in badge ids and persisted data
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Reading => "reading",
            Topic::Math => "math",
            Topic::Culture => "culture",
            Topic::Geography => "geography",
        }
    }

    /// Capitalized form for user-facing text
    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Reading => "Reading",
            Topic::Math => "Math",
            Topic::Culture => "Culture",
            Topic::Geography => "Geography",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-topic lesson counters.
/// Invariant: `0 <= completed_lessons <= total_lessons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub topic: Topic,
    pub completed_lessons: u32,
    pub total_lessons: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<DateTime<Utc>>,
}

impl LessonProgress {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            completed_lessons: 0,
            total_lessons: LESSONS_PER_TOPIC,
            last_completed: None,
        }
    }

    /// Whether every lesson in this topic has been completed
    pub fn is_complete(&self) -> bool {
        self.completed_lessons >= self.total_lessons
    }
}

/// One bounded interval of learning activity. A session with no end
/// timestamp is "open"; duration is set only on close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// Parent-configured limits and content gates for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetySettings {
    pub daily_time_limit_minutes: u32,
    pub session_time_limit_minutes: u32,
    pub content_filter_enabled: bool,
    pub age_appropriate_enabled: bool,
    pub allowed_topics: Vec<Topic>,
}

impl Default for SafetySettings {
    fn default() -> Self {
        Self {
            daily_time_limit_minutes: 60,
            session_time_limit_minutes: 30,
            content_filter_enabled: true,
            age_appropriate_enabled: true,
            allowed_topics: Topic::ALL.to_vec(),
        }
    }
}

/// The full progress/gamification record for one profile (1:1 with
/// `Profile`, keyed by profile id, created together with it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProgress {
    pub profile_id: String,
    pub stars: u32,
    pub streak: u32,
    /// ISO `YYYY-MM-DD` local calendar date, or `""` for never active
    pub last_active_date: String,
    pub badges: Vec<Badge>,
    pub lessons: Vec<LessonProgress>,
    pub sessions: Vec<Session>,
    pub total_time_spent_seconds: u64,
    pub weekly_goal: u32,
    pub weekly_completed: u32,
    pub safety_settings: SafetySettings,
}

impl ChildProgress {
    /// Fresh record for a newly created profile: zeroed counters, one
    /// `LessonProgress` per fixed topic, default safety settings.
    pub fn new(profile_id: &str) -> Self {
        Self {
            profile_id: profile_id.to_string(),
            stars: 0,
            streak: 0,
            last_active_date: String::new(),
            badges: Vec::new(),
            lessons: Topic::ALL.iter().map(|t| LessonProgress::new(*t)).collect(),
            sessions: Vec::new(),
            total_time_spent_seconds: 0,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            weekly_completed: 0,
            safety_settings: SafetySettings::default(),
        }
    }

    pub fn lesson(&self, topic: Topic) -> Option<&LessonProgress> {
        self.lessons.iter().find(|l| l.topic == topic)
    }

    pub fn lesson_mut(&mut self, topic: Topic) -> Option<&mut LessonProgress> {
        self.lessons.iter_mut().find(|l| l.topic == topic)
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b.id == badge_id)
    }

    /// Sum of completed lessons across all topics
    pub fn total_completed_lessons(&self) -> u32 {
        self.lessons.iter().map(|l| l.completed_lessons).sum()
    }
}

/// Current version of the persisted document layout. Documents with an
/// older (or absent) tag are migrated on load.
pub const SCHEMA_VERSION: u32 = 1;

/// Root aggregate: everything the app persists, as one document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub current_profile_id: Option<String>,
    #[serde(default)]
    pub children: HashMap<String, ChildProgress>,
}

impl AppState {
    /// Empty first-run state at the current schema version
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ..Default::default()
        }
    }

    pub fn profile(&self, profile_id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == profile_id)
    }

    pub fn child(&self, profile_id: &str) -> Option<&ChildProgress> {
        self.children.get(profile_id)
    }

    pub fn child_mut(&mut self, profile_id: &str) -> Option<&mut ChildProgress> {
        self.children.get_mut(profile_id)
    }
}
