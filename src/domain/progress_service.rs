//! Progress Tracker: lesson completions, streak recomputation, and badge
//! awards. `complete_lesson` is the single mutation point for "the learner
//! answered a full quiz correctly"; the streak and badge rules are pure
//! functions over the progress record so the calendar logic stays testable.

use anyhow::Result;
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use log::{debug, info};

use crate::domain::commands::progress::{CompleteLessonCommand, CompleteLessonResult};
use crate::domain::errors::DomainError;
use crate::domain::models::badge::{badge_definition, topic_master_badge_id, Badge};
use crate::domain::models::progress::{ChildProgress, Topic};
use crate::storage::state_store::StateStore;
use crate::storage::traits::StateStorage;

/// Stars awarded per completed lesson
const STARS_PER_LESSON: u32 = 5;

/// Star total that unlocks the star-collector badge
const STAR_COLLECTOR_THRESHOLD: u32 = 100;

/// Completed-lesson total that unlocks the dedicated-learner badge
const DEDICATED_LEARNER_THRESHOLD: u32 = 10;

#[derive(Clone)]
pub struct ProgressService<S: StateStorage> {
    store: StateStore<S>,
}

impl<S: StateStorage> ProgressService<S> {
    pub fn new(store: StateStore<S>) -> Self {
        Self { store }
    }

    /// Record one completed lesson: bump the topic counter (clamped at its
    /// total), award stars, advance the weekly counter, recompute the
    /// streak, and evaluate badges — all in one persisted step.
    pub fn complete_lesson(&self, command: CompleteLessonCommand) -> Result<CompleteLessonResult> {
        info!("Completing lesson: profile={} topic={}", command.profile_id, command.topic);

        let now = Utc::now();
        let today = Local::now().date_naive();
        let result = self.store.update(move |state| {
            let child = state
                .child_mut(&command.profile_id)
                .ok_or(DomainError::ProfileNotFound(command.profile_id.clone()))?;

            let mut completed = 0;
            if let Some(lesson) = child.lesson_mut(command.topic) {
                lesson.completed_lessons = (lesson.completed_lessons + 1).min(lesson.total_lessons);
                lesson.last_completed = Some(now);
                completed = lesson.completed_lessons;
            }

            child.stars += STARS_PER_LESSON;
            child.weekly_completed += 1;
            update_streak(child, today);
            let newly_awarded = evaluate_badges(child, now);

            Ok(CompleteLessonResult {
                stars: child.stars,
                streak: child.streak,
                completed_lessons: completed,
                newly_awarded,
            })
        })?;

        if !result.newly_awarded.is_empty() {
            info!(
                "Awarded {} badge(s): {}",
                result.newly_awarded.len(),
                result
                    .newly_awarded
                    .iter()
                    .map(|b| b.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(result)
    }

    /// Completion percentage for one topic; 0.0 for an unknown profile
    pub fn get_topic_progress(&self, profile_id: &str, topic: Topic) -> f64 {
        let state = self.store.load();
        let Some(lesson) = state.child(profile_id).and_then(|c| c.lesson(topic)) else {
            return 0.0;
        };
        if lesson.total_lessons == 0 {
            return 0.0;
        }
        f64::from(lesson.completed_lessons) / f64::from(lesson.total_lessons) * 100.0
    }

    /// Zero the weekly-completed counter. Invoked by an external weekly
    /// scheduler; the weekly goal itself is untouched.
    pub fn reset_weekly_progress(&self, profile_id: &str) -> Result<()> {
        debug!("Resetting weekly progress for profile {}", profile_id);
        let profile_id = profile_id.to_string();
        self.store.update(move |state| {
            let child = state
                .child_mut(&profile_id)
                .ok_or(DomainError::ProfileNotFound(profile_id.clone()))?;
            child.weekly_completed = 0;
            Ok(())
        })
    }
}

/// Streak rule: strictly a function of calendar-day adjacency.
/// Active today already → unchanged; active yesterday → +1; never active →
/// 1; any gap of two or more days → reset to 1. Always stamps today.
pub(crate) fn update_streak(child: &mut ChildProgress, today: NaiveDate) {
    let today_str = today.format("%Y-%m-%d").to_string();
    if child.last_active_date == today_str {
        return;
    }

    let yesterday_str = (today - Duration::days(1)).format("%Y-%m-%d").to_string();
    if child.last_active_date == yesterday_str {
        child.streak += 1;
    } else {
        // First ever activity, or a broken streak
        child.streak = 1;
    }
    child.last_active_date = today_str;
}

/// Evaluate every badge rule against the current record, appending any
/// newly earned badges. Idempotent: ids already present never re-fire.
/// Returns the badges awarded by this pass, in award order.
pub(crate) fn evaluate_badges(child: &mut ChildProgress, now: DateTime<Utc>) -> Vec<Badge> {
    let mut awarded = Vec::new();
    let mut award = |child: &mut ChildProgress, badge_id: &str| {
        if child.has_badge(badge_id) {
            return;
        }
        if let Some(definition) = badge_definition(badge_id) {
            let badge = Badge::unlock(definition, now);
            child.badges.push(badge.clone());
            awarded.push(badge);
        }
    };

    // Topic mastery
    for topic in Topic::ALL {
        if child.lesson(topic).is_some_and(|l| l.is_complete()) {
            award(child, &topic_master_badge_id(topic));
        }
    }

    // Streak milestones; both can fire in the same pass
    if child.streak >= 7 {
        award(child, "streak-7");
    }
    if child.streak >= 30 {
        award(child, "streak-30");
    }

    if child.stars >= STAR_COLLECTOR_THRESHOLD {
        award(child, "star-collector");
    }

    if child.total_completed_lessons() >= DEDICATED_LEARNER_THRESHOLD {
        award(child, "dedicated-learner");
    }

    // World explorer: culture and geography both fully complete
    let culture_done = child.lesson(Topic::Culture).is_some_and(|l| l.is_complete());
    let geography_done = child.lesson(Topic::Geography).is_some_and(|l| l.is_complete());
    if culture_done && geography_done {
        award(child, "world-explorer");
    }

    awarded
}
