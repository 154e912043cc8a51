//! Domain-level command and query types.
//! These structs are used by services inside the domain layer; UI layers
//! are responsible for mapping their own inputs onto these internal types.

pub mod profile {
    use crate::domain::models::profile::Profile;

    /// Input for creating a new profile.
    #[derive(Debug, Clone)]
    pub struct CreateProfileCommand {
        pub name: String,
        pub avatar: String,
    }

    /// Result of creating a profile (its `ChildProgress` record is
    /// initialized in the same step).
    #[derive(Debug, Clone)]
    pub struct CreateProfileResult {
        pub profile: Profile,
    }

    /// Input for renaming an existing profile.
    #[derive(Debug, Clone)]
    pub struct RenameProfileCommand {
        pub profile_id: String,
        pub name: String,
    }

    /// Result of renaming a profile.
    #[derive(Debug, Clone)]
    pub struct RenameProfileResult {
        pub profile: Profile,
    }
}

pub mod progress {
    use crate::domain::models::badge::Badge;
    use crate::domain::models::progress::Topic;

    /// Input for recording a completed lesson.
    #[derive(Debug, Clone)]
    pub struct CompleteLessonCommand {
        pub profile_id: String,
        pub topic: Topic,
    }

    /// Result of recording a completed lesson.
    #[derive(Debug, Clone)]
    pub struct CompleteLessonResult {
        pub stars: u32,
        pub streak: u32,
        pub completed_lessons: u32,
        /// Badges unlocked by this completion, in award order
        pub newly_awarded: Vec<Badge>,
    }
}

pub mod session {
    use crate::domain::models::progress::Topic;

    /// Input for opening a learning session.
    #[derive(Debug, Clone)]
    pub struct StartSessionCommand {
        pub profile_id: String,
        pub topic: Option<Topic>,
    }

    /// Result of opening a session.
    #[derive(Debug, Clone)]
    pub struct StartSessionResult {
        /// Index of the new session in the profile's session list
        pub session_index: usize,
    }

    /// Input for closing a learning session.
    #[derive(Debug, Clone)]
    pub struct EndSessionCommand {
        pub profile_id: String,
        pub session_index: usize,
    }

    /// Result of closing a session.
    #[derive(Debug, Clone)]
    pub struct EndSessionResult {
        pub duration_seconds: u64,
        pub total_time_spent_seconds: u64,
    }
}

pub mod safety {
    use crate::domain::models::progress::{SafetySettings, Topic};

    /// Outcome of a daily time-limit check.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TimeLimitCheck {
        pub allowed: bool,
        pub reason: Option<String>,
        pub remaining_minutes: Option<u32>,
    }

    /// Partial update to a profile's safety settings; `None` fields are
    /// left unchanged (shallow merge).
    #[derive(Debug, Clone, Default)]
    pub struct SafetySettingsUpdate {
        pub daily_time_limit_minutes: Option<u32>,
        pub session_time_limit_minutes: Option<u32>,
        pub content_filter_enabled: Option<bool>,
        pub age_appropriate_enabled: Option<bool>,
        pub allowed_topics: Option<Vec<Topic>>,
    }

    /// Input for updating safety settings.
    #[derive(Debug, Clone)]
    pub struct UpdateSafetySettingsCommand {
        pub profile_id: String,
        pub update: SafetySettingsUpdate,
    }

    /// Result of updating safety settings.
    #[derive(Debug, Clone)]
    pub struct UpdateSafetySettingsResult {
        pub settings: SafetySettings,
    }
}
