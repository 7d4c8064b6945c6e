//! In-memory session store.
//!
//! Holds the ordered history of ended sessions plus at most one session in
//! progress. Nothing is persisted; history lives for the life of the process
//! and grows without bound.

use tracing::{info, warn};

use crate::error::StoreError;
use crate::models::Session;

/// Owner of the session history and the in-progress session.
///
/// The store itself does no locking. The server keeps it behind a single
/// `RwLock` so start and end calls are serialized.
#[derive(Debug, Default)]
pub struct SessionStore {
    /// Ended sessions in the order they were ended.
    sessions: Vec<Session>,
    /// The session currently running, if any.
    current: Option<Session>,
}

impl SessionStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            sessions: Vec::new(),
            current: None,
        }
    }

    /// Start a new session and make it the in-progress one.
    ///
    /// The id is `len(history) + 1`. Any session already in progress is
    /// replaced and never reaches the history; its id is reused.
    pub fn start_session(
        &mut self,
        duration: f64,
        session_type: impl Into<String>,
        environment: impl Into<String>,
    ) -> &Session {
        let id = self.sessions.len() as u64 + 1;
        let session = Session::new(id, duration, session_type, environment);

        if let Some(replaced) = self.current.take() {
            warn!(
                replaced_id = replaced.id,
                started_at = %replaced.start_time.to_rfc3339(),
                "discarding in-progress session replaced by a new start"
            );
        }

        info!(
            id,
            planned = duration,
            session_type = %session.session_type,
            environment = %session.environment,
            "session started"
        );
        self.current.insert(session)
    }

    /// End the in-progress session and move it into the history.
    ///
    /// Fails with [`StoreError::NoActiveSession`] when nothing is running, in
    /// which case the history is left untouched.
    pub fn end_session(
        &mut self,
        actual_duration: Option<f64>,
        completed: bool,
    ) -> Result<&Session, StoreError> {
        let Some(mut session) = self.current.take() else {
            warn!("end requested with no active session");
            return Err(StoreError::NoActiveSession);
        };

        session.end_time = Some(chrono::Local::now());
        session.actual_duration = actual_duration;
        session.completed = completed;

        info!(
            id = session.id,
            completed,
            actual = ?actual_duration,
            "session ended"
        );
        let index = self.sessions.len();
        self.sessions.push(session);
        Ok(&self.sessions[index])
    }

    /// Ended sessions, oldest first.
    pub fn history(&self) -> &[Session] {
        &self.sessions
    }

    /// The session currently in progress.
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_DURATION_MINUTES, DEFAULT_ENVIRONMENT, DEFAULT_SESSION_TYPE};

    impl SessionStore {
        fn start_default(&mut self) -> &Session {
            self.start_session(
                DEFAULT_DURATION_MINUTES,
                DEFAULT_SESSION_TYPE,
                DEFAULT_ENVIRONMENT,
            )
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::new();
        assert!(store.history().is_empty());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_start_assigns_next_id() {
        let mut store = SessionStore::new();
        assert_eq!(store.start_default().id, 1);
        store.end_session(Some(25.0), true).unwrap();
        assert_eq!(store.start_default().id, 2);
        store.end_session(None, false).unwrap();
        assert_eq!(store.start_session(50.0, "deep", "cafe").id, 3);
    }

    #[test]
    fn test_start_applies_defaults() {
        let mut store = SessionStore::new();
        let session = store.start_default();
        assert!((session.planned_duration - 25.0).abs() < f64::EPSILON);
        assert_eq!(session.session_type, "focus");
        assert_eq!(session.environment, "default");
        assert!(!session.completed);
    }

    #[test]
    fn test_start_accepts_any_duration() {
        let mut store = SessionStore::new();
        let session = store.start_session(-5.0, "break", "default");
        assert!((session.planned_duration + 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_end_without_active_session_fails() {
        let mut store = SessionStore::new();
        assert_eq!(
            store.end_session(Some(10.0), true).unwrap_err(),
            StoreError::NoActiveSession
        );
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_end_appends_and_clears_current() {
        let mut store = SessionStore::new();
        store.start_session(30.0, "focus", "forest");

        let ended = store.end_session(Some(28.0), false).unwrap();
        assert_eq!(ended.id, 1);
        assert!(!ended.completed);
        assert_eq!(ended.actual_duration, Some(28.0));
        assert!(ended.end_time.is_some());

        assert_eq!(store.history().len(), 1);
        assert!(store.current().is_none());
        assert_eq!(store.history()[0].environment, "forest");
    }

    #[test]
    fn test_end_twice_fails_second_time() {
        let mut store = SessionStore::new();
        store.start_default();
        store.end_session(None, true).unwrap();
        assert!(store.end_session(None, true).is_err());
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_restart_discards_in_progress_session() {
        let mut store = SessionStore::new();
        store.start_session(25.0, "focus", "first");
        let second = store.start_session(15.0, "focus", "second");
        assert_eq!(second.id, 1);

        store.end_session(Some(15.0), true).unwrap();
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].environment, "second");
        assert!(store.history().iter().all(|s| s.environment != "first"));
    }

    #[test]
    fn test_history_ids_are_contiguous() {
        let mut store = SessionStore::new();
        for _ in 0..3 {
            store.start_default();
            store.start_default();
            store.end_session(Some(1.0), true).unwrap();
        }
        let ids: Vec<u64> = store.history().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
