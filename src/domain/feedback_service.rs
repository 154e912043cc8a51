//! Feedback Generator: read-only, presentation-adjacent daily summaries
//! for the parent dashboard, derived entirely from the persisted record.

use chrono::{DateTime, Local, NaiveDate, Utc};
use log::debug;

use crate::domain::models::progress::ChildProgress;
use crate::storage::state_store::StateStore;
use crate::storage::traits::StateStorage;

#[derive(Clone)]
pub struct FeedbackService<S: StateStorage> {
    store: StateStore<S>,
}

impl<S: StateStorage> FeedbackService<S> {
    pub fn new(store: StateStore<S>) -> Self {
        Self { store }
    }

    /// Human-readable lines describing today's activity for a profile.
    /// Empty for an unknown progress record; a single encouragement line
    /// when nothing happened today.
    pub fn generate_feedback_summary(&self, profile_id: &str) -> Vec<String> {
        let state = self.store.load();
        let child_name = state
            .profile(profile_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Your child".to_string());

        let Some(child) = state.child(profile_id) else {
            debug!("No progress record for profile {}, no feedback to give", profile_id);
            return Vec::new();
        };

        summarize(child, &child_name, Local::now().date_naive())
    }
}

fn is_today(timestamp: DateTime<Utc>, today: NaiveDate) -> bool {
    timestamp.with_timezone(&Local).date_naive() == today
}

fn summarize(child: &ChildProgress, child_name: &str, today: NaiveDate) -> Vec<String> {
    let mut summaries = Vec::new();

    let sessions_today = child
        .sessions
        .iter()
        .filter(|s| s.ended_at.is_some_and(|end| is_today(end, today)))
        .count();
    if sessions_today > 0 {
        let noun = if sessions_today == 1 { "lesson" } else { "lessons" };
        summaries.push(format!("{} completed {} {} today!", child_name, sessions_today, noun));
    }

    for lesson in &child.lessons {
        if lesson.last_completed.is_some_and(|at| is_today(at, today)) {
            summaries.push(format!(
                "Great progress in {}! {} completed a {} lesson.",
                lesson.topic.display_name(),
                child_name,
                lesson.topic
            ));
        }
    }

    let badges_today = child
        .badges
        .iter()
        .filter(|b| is_today(b.unlocked_at, today))
        .count();
    if badges_today > 0 {
        let noun = if badges_today == 1 { "badge" } else { "badges" };
        summaries.push(format!("🎉 Earned {} new {} today!", badges_today, noun));
    }

    if child.streak > 0 && child.streak % 7 == 0 {
        summaries.push(format!("🔥 Amazing! {} day streak! Keep it up!", child.streak));
    }

    if summaries.is_empty() {
        summaries.push(format!(
            "No recent activity. Encourage {} to start learning!",
            child_name
        ));
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::profile::CreateProfileCommand;
    use crate::domain::commands::progress::CompleteLessonCommand;
    use crate::domain::commands::session::{EndSessionCommand, StartSessionCommand};
    use crate::domain::models::progress::Topic;
    use crate::domain::profile_service::ProfileService;
    use crate::domain::progress_service::ProgressService;
    use crate::domain::session_service::SessionService;
    use crate::storage::memory::MemoryStorage;
    use std::sync::Arc;

    struct Fixture {
        feedback: FeedbackService<MemoryStorage>,
        progress: ProgressService<MemoryStorage>,
        sessions: SessionService<MemoryStorage>,
        store: StateStore<MemoryStorage>,
        profile_id: String,
    }

    fn setup_test() -> Fixture {
        let _ = env_logger::builder().is_test(true).try_init();
        let store = StateStore::new(Arc::new(MemoryStorage::new()));
        let profile = ProfileService::new(store.clone())
            .create_profile(CreateProfileCommand {
                name: "Mina".to_string(),
                avatar: "🦊".to_string(),
            })
            .unwrap()
            .profile;
        Fixture {
            feedback: FeedbackService::new(store.clone()),
            progress: ProgressService::new(store.clone()),
            sessions: SessionService::new(store.clone()),
            store,
            profile_id: profile.id,
        }
    }

    #[test]
    fn test_unknown_profile_yields_no_lines() {
        let fx = setup_test();
        assert!(fx.feedback.generate_feedback_summary("profile::999").is_empty());
    }

    #[test]
    fn test_quiet_day_yields_encouragement() {
        let fx = setup_test();
        let lines = fx.feedback.generate_feedback_summary(&fx.profile_id);
        assert_eq!(lines, vec!["No recent activity. Encourage Mina to start learning!".to_string()]);
    }

    #[test]
    fn test_todays_activity_is_summarized() {
        let fx = setup_test();

        let start = fx
            .sessions
            .start_session(StartSessionCommand {
                profile_id: fx.profile_id.clone(),
                topic: Some(Topic::Math),
            })
            .unwrap();
        fx.sessions
            .end_session(EndSessionCommand {
                profile_id: fx.profile_id.clone(),
                session_index: start.session_index,
            })
            .unwrap();
        fx.progress
            .complete_lesson(CompleteLessonCommand {
                profile_id: fx.profile_id.clone(),
                topic: Topic::Math,
            })
            .unwrap();

        let lines = fx.feedback.generate_feedback_summary(&fx.profile_id);
        assert!(lines.iter().any(|l| l == "Mina completed 1 lesson today!"));
        assert!(lines
            .iter()
            .any(|l| l == "Great progress in Math! Mina completed a math lesson."));
        // One lesson on day one: no badge, no streak milestone
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_badges_earned_today_are_counted() {
        let fx = setup_test();
        {
            let id = fx.profile_id.clone();
            fx.store
                .update(move |state| {
                    state.child_mut(&id).unwrap().stars = 95;
                    Ok(())
                })
                .unwrap();
        }
        fx.progress
            .complete_lesson(CompleteLessonCommand {
                profile_id: fx.profile_id.clone(),
                topic: Topic::Reading,
            })
            .unwrap();

        let lines = fx.feedback.generate_feedback_summary(&fx.profile_id);
        assert!(lines.iter().any(|l| l == "🎉 Earned 1 new badge today!"));
    }

    #[test]
    fn test_streak_milestone_line_fires_on_multiples_of_seven() {
        let mut child = ChildProgress::new("p");
        child.streak = 14;
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let lines = summarize(&child, "Mina", today);
        assert!(lines.iter().any(|l| l == "🔥 Amazing! 14 day streak! Keep it up!"));

        child.streak = 15;
        let lines = summarize(&child, "Mina", today);
        assert!(!lines.iter().any(|l| l.contains("day streak")));
    }
}
