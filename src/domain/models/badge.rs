//! Badge models and the static badge catalog.
//!
//! `BadgeDefinition` entries are the global, read-only catalog; a `Badge`
//! is an earned instance of one of them with an unlock timestamp. A given
//! badge id can be earned at most once per profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::progress::Topic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Topic,
    Streak,
    Milestone,
    Achievement,
}

/// Static catalog entry. Global and read-only at runtime, never persisted
/// per-profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub category: BadgeCategory,
}

/// An earned badge: a copy of the catalog definition plus the unlock
/// timestamp. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub category: BadgeCategory,
    pub unlocked_at: DateTime<Utc>,
}

impl Badge {
    /// Instantiate an earned badge from its catalog definition
    pub fn unlock(definition: &BadgeDefinition, unlocked_at: DateTime<Utc>) -> Self {
        Self {
            id: definition.id.to_string(),
            name: definition.name.to_string(),
            emoji: definition.emoji.to_string(),
            description: definition.description.to_string(),
            category: definition.category,
            unlocked_at,
        }
    }
}

pub const BADGE_CATALOG: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: "reading-master",
        name: "Reading Master",
        emoji: "📚",
        description: "Completed all Reading lessons",
        category: BadgeCategory::Topic,
    },
    BadgeDefinition {
        id: "math-master",
        name: "Math Master",
        emoji: "🔢",
        description: "Completed all Math lessons",
        category: BadgeCategory::Topic,
    },
    BadgeDefinition {
        id: "culture-master",
        name: "Culture Master",
        emoji: "🌍",
        description: "Completed all Culture lessons",
        category: BadgeCategory::Topic,
    },
    BadgeDefinition {
        id: "geography-master",
        name: "Geography Master",
        emoji: "🗺️",
        description: "Completed all Geography lessons",
        category: BadgeCategory::Topic,
    },
    BadgeDefinition {
        id: "streak-7",
        name: "Week Warrior",
        emoji: "🔥",
        description: "7 day streak!",
        category: BadgeCategory::Streak,
    },
    BadgeDefinition {
        id: "streak-30",
        name: "Monthly Master",
        emoji: "⭐",
        description: "30 day streak!",
        category: BadgeCategory::Streak,
    },
    BadgeDefinition {
        id: "world-explorer",
        name: "World Explorer",
        emoji: "🌎",
        description: "Explored all cultural topics",
        category: BadgeCategory::Milestone,
    },
    BadgeDefinition {
        id: "star-collector",
        name: "Star Collector",
        emoji: "⭐",
        description: "Earned 100 stars",
        category: BadgeCategory::Achievement,
    },
    BadgeDefinition {
        id: "dedicated-learner",
        name: "Dedicated Learner",
        emoji: "🏆",
        description: "Completed 10 lessons",
        category: BadgeCategory::Achievement,
    },
];

/// Look up a catalog definition by id
pub fn badge_definition(id: &str) -> Option<&'static BadgeDefinition> {
    BADGE_CATALOG.iter().find(|d| d.id == id)
}

/// Catalog id of the mastery badge for a topic
pub fn topic_master_badge_id(topic: Topic) -> String {
    format!("{}-master", topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, def) in BADGE_CATALOG.iter().enumerate() {
            assert!(
                !BADGE_CATALOG[i + 1..].iter().any(|other| other.id == def.id),
                "duplicate badge id: {}",
                def.id
            );
        }
    }

    #[test]
    fn test_every_topic_has_a_master_badge() {
        for topic in Topic::ALL {
            let id = topic_master_badge_id(topic);
            assert!(badge_definition(&id).is_some(), "missing {}", id);
        }
    }

    #[test]
    fn test_unlock_copies_definition() {
        let def = badge_definition("streak-7").unwrap();
        let now = Utc::now();
        let badge = Badge::unlock(def, now);
        assert_eq!(badge.id, "streak-7");
        assert_eq!(badge.name, "Week Warrior");
        assert_eq!(badge.category, BadgeCategory::Streak);
        assert_eq!(badge.unlocked_at, now);
    }
}
