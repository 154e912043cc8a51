use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};

use crate::domain::commands::profile::{
    CreateProfileCommand, CreateProfileResult, RenameProfileCommand, RenameProfileResult,
};
use crate::domain::errors::DomainError;
use crate::domain::models::profile::Profile;
use crate::domain::models::progress::ChildProgress;
use crate::storage::state_store::StateStore;
use crate::storage::traits::StateStorage;

/// Service for managing learner profiles and the active-profile pointer
#[derive(Clone)]
pub struct ProfileService<S: StateStorage> {
    store: StateStore<S>,
}

impl<S: StateStorage> ProfileService<S> {
    pub fn new(store: StateStore<S>) -> Self {
        Self { store }
    }

    /// Create a new profile and its paired progress record in one step.
    ///
    /// Only the empty-name case is rejected here; length and uniqueness
    /// validation belong to the UI boundary.
    pub fn create_profile(&self, command: CreateProfileCommand) -> Result<CreateProfileResult> {
        info!("Creating profile: name={}", command.name);

        if command.name.trim().is_empty() {
            return Err(DomainError::InvalidName.into());
        }

        let now = Utc::now();
        let created = self.store.update(move |state| {
            // Time-derived id; step the millisecond forward if two profiles
            // land on the same tick
            let mut millis = now.timestamp_millis() as u64;
            while state.profile(&Profile::generate_id(millis)).is_some() {
                millis += 1;
            }
            let profile = Profile {
                id: Profile::generate_id(millis),
                name: command.name,
                avatar: command.avatar,
                created_at: now,
            };
            state
                .children
                .insert(profile.id.clone(), ChildProgress::new(&profile.id));
            state.profiles.push(profile.clone());
            Ok(profile)
        })?;

        info!("Created profile: {} with ID: {}", created.name, created.id);
        Ok(CreateProfileResult { profile: created })
    }

    /// List all profiles in creation order
    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.store.load().profiles)
    }

    /// Resolve the active profile pointer, or `None` when it is unset or
    /// stale (pointer and profile list may drift).
    pub fn get_current_profile(&self) -> Result<Option<Profile>> {
        let state = self.store.load();
        let Some(current_id) = state.current_profile_id else {
            debug!("No current profile set");
            return Ok(None);
        };
        let profile = state.profiles.iter().find(|p| p.id == current_id).cloned();
        if profile.is_none() {
            warn!("Current profile ID is stale: {}", current_id);
        }
        Ok(profile)
    }

    /// Set the active profile pointer. Unconditional: an unknown id is
    /// accepted (and logged), matching the drift tolerance of
    /// `get_current_profile`.
    pub fn set_current_profile(&self, profile_id: &str) -> Result<()> {
        info!("Setting current profile: {}", profile_id);
        let profile_id = profile_id.to_string();
        self.store.update(move |state| {
            if state.profile(&profile_id).is_none() {
                warn!("Setting current profile to unknown ID: {}", profile_id);
            }
            state.current_profile_id = Some(profile_id);
            Ok(())
        })
    }

    /// Rename a profile; the one mutation profiles support
    pub fn rename_profile(&self, command: RenameProfileCommand) -> Result<RenameProfileResult> {
        info!("Renaming profile: {}", command.profile_id);

        if command.name.trim().is_empty() {
            return Err(DomainError::InvalidName.into());
        }

        let profile = self.store.update(move |state| {
            let profile = state
                .profiles
                .iter_mut()
                .find(|p| p.id == command.profile_id)
                .ok_or(DomainError::ProfileNotFound(command.profile_id))?;
            profile.name = command.name;
            Ok(profile.clone())
        })?;

        info!("Renamed profile {} to: {}", profile.id, profile.name);
        Ok(RenameProfileResult { profile })
    }

    /// Fetch the progress record paired with a profile
    pub fn get_child_progress(&self, profile_id: &str) -> Result<Option<ChildProgress>> {
        Ok(self.store.load().children.get(profile_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::progress::{Topic, DEFAULT_WEEKLY_GOAL, LESSONS_PER_TOPIC};
    use crate::storage::memory::MemoryStorage;
    use std::sync::Arc;

    fn setup_test() -> ProfileService<MemoryStorage> {
        let _ = env_logger::builder().is_test(true).try_init();
        let store = StateStore::new(Arc::new(MemoryStorage::new()));
        ProfileService::new(store)
    }

    fn create(service: &ProfileService<MemoryStorage>, name: &str) -> Profile {
        service
            .create_profile(CreateProfileCommand {
                name: name.to_string(),
                avatar: "🦊".to_string(),
            })
            .unwrap()
            .profile
    }

    #[test]
    fn test_create_profile_initializes_progress_record() {
        let service = setup_test();
        let profile = create(&service, "Mina");

        assert!(profile.id.starts_with("profile::"));
        let child = service.get_child_progress(&profile.id).unwrap().unwrap();
        assert_eq!(child.profile_id, profile.id);
        assert_eq!(child.stars, 0);
        assert_eq!(child.streak, 0);
        assert_eq!(child.weekly_goal, DEFAULT_WEEKLY_GOAL);
        assert!(child.badges.is_empty());
        assert!(child.sessions.is_empty());
        for topic in Topic::ALL {
            let lesson = child.lesson(topic).unwrap();
            assert_eq!(lesson.completed_lessons, 0);
            assert_eq!(lesson.total_lessons, LESSONS_PER_TOPIC);
        }
        assert_eq!(child.safety_settings.daily_time_limit_minutes, 60);
        assert_eq!(child.safety_settings.allowed_topics, Topic::ALL.to_vec());
    }

    #[test]
    fn test_create_profile_rejects_empty_name() {
        let service = setup_test();
        let result = service.create_profile(CreateProfileCommand {
            name: "   ".to_string(),
            avatar: "🦊".to_string(),
        });
        let err = result.unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::InvalidName));
        assert!(service.list_profiles().unwrap().is_empty());
    }

    #[test]
    fn test_current_profile_defaults_to_none() {
        let service = setup_test();
        assert!(service.get_current_profile().unwrap().is_none());
    }

    #[test]
    fn test_set_and_get_current_profile() {
        let service = setup_test();
        let profile = create(&service, "Mina");
        service.set_current_profile(&profile.id).unwrap();
        let current = service.get_current_profile().unwrap().unwrap();
        assert_eq!(current.id, profile.id);
        assert_eq!(current.name, "Mina");
    }

    #[test]
    fn test_stale_current_profile_resolves_to_none() {
        let service = setup_test();
        create(&service, "Mina");
        // The pointer is set unconditionally even for an unknown id
        service.set_current_profile("profile::999").unwrap();
        assert!(service.get_current_profile().unwrap().is_none());
    }

    #[test]
    fn test_rename_profile() {
        let service = setup_test();
        let profile = create(&service, "Mina");
        let renamed = service
            .rename_profile(RenameProfileCommand {
                profile_id: profile.id.clone(),
                name: "Mina B".to_string(),
            })
            .unwrap();
        assert_eq!(renamed.profile.name, "Mina B");
        assert_eq!(service.list_profiles().unwrap()[0].name, "Mina B");
    }

    #[test]
    fn test_rename_unknown_profile_fails_typed() {
        let service = setup_test();
        let err = service
            .rename_profile(RenameProfileCommand {
                profile_id: "profile::999".to_string(),
                name: "Nobody".to_string(),
            })
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::ProfileNotFound("profile::999".to_string()))
        );
    }

    #[test]
    fn test_list_profiles_in_creation_order() {
        let service = setup_test();
        create(&service, "Alice");
        create(&service, "Bob");
        let names: Vec<String> = service
            .list_profiles()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Alice".to_string(), "Bob".to_string()]);
    }
}
