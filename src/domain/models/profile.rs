use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a learner profile.
/// Immutable after creation except for the display name (rename is allowed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Generate a time-derived unique ID for a profile
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("profile::{}", timestamp_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_time_derived() {
        assert_eq!(Profile::generate_id(1700000000000), "profile::1700000000000");
    }
}
