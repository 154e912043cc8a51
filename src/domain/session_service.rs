//! Session Tracker: brackets learning activity in timed sessions and
//! accumulates time spent, globally and per topic.
//!
//! Invariant enforced here rather than left to callers: a profile holds at
//! most one open session. Starting a new session closes a forgotten one
//! first, and a session can be closed at most once, so cumulative time is
//! never double-counted.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashMap;

use crate::domain::commands::session::{
    EndSessionCommand, EndSessionResult, StartSessionCommand, StartSessionResult,
};
use crate::domain::errors::DomainError;
use crate::domain::models::progress::{ChildProgress, Session, Topic};
use crate::storage::state_store::StateStore;
use crate::storage::traits::StateStorage;

#[derive(Clone)]
pub struct SessionService<S: StateStorage> {
    store: StateStore<S>,
}

impl<S: StateStorage> SessionService<S> {
    pub fn new(store: StateStore<S>) -> Self {
        Self { store }
    }

    /// Open a session for the profile, closing any session still open from
    /// an earlier start.
    pub fn start_session(&self, command: StartSessionCommand) -> Result<StartSessionResult> {
        info!(
            "Starting session: profile={} topic={:?}",
            command.profile_id,
            command.topic.map(|t| t.as_str())
        );

        let now = Utc::now();
        self.store.update(move |state| {
            let child = state
                .child_mut(&command.profile_id)
                .ok_or(DomainError::ProfileNotFound(command.profile_id.clone()))?;

            let closed = close_open_sessions(child, now);
            if closed > 0 {
                warn!(
                    "Profile {} had {} session(s) left open; closed before starting a new one",
                    command.profile_id, closed
                );
            }

            child.sessions.push(Session {
                started_at: now,
                ended_at: None,
                topic: command.topic,
                duration_seconds: None,
            });
            Ok(StartSessionResult {
                session_index: child.sessions.len() - 1,
            })
        })
    }

    /// Close the session at the given index. Fails typed on a missing
    /// profile, an out-of-range index, or a session that is already closed.
    pub fn end_session(&self, command: EndSessionCommand) -> Result<EndSessionResult> {
        info!(
            "Ending session: profile={} index={}",
            command.profile_id, command.session_index
        );

        let now = Utc::now();
        self.store.update(move |state| {
            let child = state
                .child_mut(&command.profile_id)
                .ok_or(DomainError::ProfileNotFound(command.profile_id.clone()))?;

            let session = child.sessions.get_mut(command.session_index).ok_or(
                DomainError::SessionNotFound {
                    profile_id: command.profile_id.clone(),
                    session_index: command.session_index,
                },
            )?;
            if !session.is_open() {
                return Err(DomainError::SessionAlreadyClosed {
                    profile_id: command.profile_id.clone(),
                    session_index: command.session_index,
                });
            }

            let duration = close_session(session, now);
            child.total_time_spent_seconds += duration;
            Ok(EndSessionResult {
                duration_seconds: duration,
                total_time_spent_seconds: child.total_time_spent_seconds,
            })
        })
    }

    /// Seconds of closed-session time per topic. Sessions without a topic
    /// or without a duration are ignored; an unknown profile yields the
    /// zero map.
    pub fn get_time_per_topic(&self, profile_id: &str) -> HashMap<Topic, u64> {
        let mut per_topic: HashMap<Topic, u64> = Topic::ALL.iter().map(|t| (*t, 0)).collect();
        let state = self.store.load();
        if let Some(child) = state.child(profile_id) {
            for session in &child.sessions {
                if let (Some(topic), Some(duration)) = (session.topic, session.duration_seconds) {
                    *per_topic.entry(topic).or_default() += duration;
                }
            }
        }
        per_topic
    }
}

/// Stamp the end timestamp and whole-second duration on an open session,
/// returning the duration
fn close_session(session: &mut Session, now: DateTime<Utc>) -> u64 {
    let duration = (now - session.started_at).num_seconds().max(0) as u64;
    session.ended_at = Some(now);
    session.duration_seconds = Some(duration);
    duration
}

/// Close every open session on the record, accumulating their durations
/// into total time spent. Returns how many were closed.
fn close_open_sessions(child: &mut ChildProgress, now: DateTime<Utc>) -> usize {
    let mut closed = 0;
    let mut accumulated = 0;
    for session in child.sessions.iter_mut().filter(|s| s.is_open()) {
        accumulated += close_session(session, now);
        closed += 1;
    }
    child.total_time_spent_seconds += accumulated;
    closed
}
