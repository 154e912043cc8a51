//! Safety Guard: parental daily time limits and settings updates.
//!
//! Only the daily aggregate is enforced here. The per-session limit in
//! `SafetySettings` is advisory: the UI polls it while a session runs.

use anyhow::Result;
use chrono::Local;
use log::info;

use crate::domain::commands::safety::{
    TimeLimitCheck, UpdateSafetySettingsCommand, UpdateSafetySettingsResult,
};
use crate::domain::errors::DomainError;
use crate::domain::models::progress::ChildProgress;
use crate::storage::state_store::StateStore;
use crate::storage::traits::StateStorage;

#[derive(Clone)]
pub struct SafetyService<S: StateStorage> {
    store: StateStore<S>,
}

impl<S: StateStorage> SafetyService<S> {
    pub fn new(store: StateStore<S>) -> Self {
        Self { store }
    }

    /// Compare today's closed-session minutes against the profile's daily
    /// limit. A missing profile is reported in the check result, not as an
    /// error, so gating callers can deny access uniformly.
    pub fn check_time_limit(&self, profile_id: &str) -> TimeLimitCheck {
        let state = self.store.load();
        let Some(child) = state.child(profile_id) else {
            return TimeLimitCheck {
                allowed: false,
                reason: Some("Profile not found".to_string()),
                remaining_minutes: None,
            };
        };

        let used_minutes = minutes_used_today(child);
        let limit = child.safety_settings.daily_time_limit_minutes;
        if used_minutes >= limit {
            info!(
                "Daily time limit reached for profile {}: {}min of {}min",
                profile_id, used_minutes, limit
            );
            return TimeLimitCheck {
                allowed: false,
                reason: Some("Daily time limit reached".to_string()),
                remaining_minutes: Some(0),
            };
        }

        TimeLimitCheck {
            allowed: true,
            reason: None,
            remaining_minutes: Some(limit - used_minutes),
        }
    }

    /// Shallow-merge the given fields into the profile's safety settings
    pub fn update_safety_settings(
        &self,
        command: UpdateSafetySettingsCommand,
    ) -> Result<UpdateSafetySettingsResult> {
        info!("Updating safety settings for profile {}", command.profile_id);

        let settings = self.store.update(move |state| {
            let child = state
                .child_mut(&command.profile_id)
                .ok_or(DomainError::ProfileNotFound(command.profile_id.clone()))?;

            let settings = &mut child.safety_settings;
            let update = command.update;
            if let Some(v) = update.daily_time_limit_minutes {
                settings.daily_time_limit_minutes = v;
            }
            if let Some(v) = update.session_time_limit_minutes {
                settings.session_time_limit_minutes = v;
            }
            if let Some(v) = update.content_filter_enabled {
                settings.content_filter_enabled = v;
            }
            if let Some(v) = update.age_appropriate_enabled {
                settings.age_appropriate_enabled = v;
            }
            if let Some(v) = update.allowed_topics {
                settings.allowed_topics = v;
            }
            Ok(settings.clone())
        })?;

        Ok(UpdateSafetySettingsResult { settings })
    }
}

/// Whole minutes of session time ended on today's local calendar date
fn minutes_used_today(child: &ChildProgress) -> u32 {
    let today = Local::now().date_naive();
    let seconds: u64 = child
        .sessions
        .iter()
        .filter(|s| {
            s.ended_at
                .is_some_and(|end| end.with_timezone(&Local).date_naive() == today)
        })
        .filter_map(|s| s.duration_seconds)
        .sum();
    (seconds / 60) as u32
}
