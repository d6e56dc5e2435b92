//! Stateful running session store for a single signed-in user.
//!
//! Keeps a local copy of the user's sessions along with `loading` and `error`
//! flags, the way an interactive client consumes the service. Failures never
//! propagate out of the store: they are stringified into [`RunningStore::error`]
//! and the operation returns its failure value (`None` or `false`).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use crate::application::services::RunningService;
use crate::application::services::summary::{self, RunningSummary};
use crate::domain::entities::{NewRunningSession, RunningSession, RunningSessionPatch};
use crate::domain::identity::{IdentityProvider, UserIdentity};
use crate::domain::repositories::RunningSessionRepository;
use crate::error::AppError;

const NO_USER: &str = "No authenticated user";

#[derive(Debug, Default)]
struct StoreState {
    sessions: Vec<RunningSession>,
    loading: bool,
    error: Option<String>,
}

/// Marks the store busy for as long as it is alive.
///
/// Entering clears the previous error; dropping resets `loading` on every exit
/// path, including early returns.
struct LoadingGuard<'a> {
    state: &'a Mutex<StoreState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a Mutex<StoreState>) -> Self {
        {
            let mut state = lock(state);
            state.loading = true;
            state.error = None;
        }
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
    }
}

fn lock(state: &Mutex<StoreState>) -> MutexGuard<'_, StoreState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RunningStore<R: ?Sized = dyn RunningSessionRepository> {
    service: Arc<RunningService<R>>,
    identity: Arc<dyn IdentityProvider>,
    state: Mutex<StoreState>,
}

impl<R: RunningSessionRepository + ?Sized> RunningStore<R> {
    pub fn new(service: Arc<RunningService<R>>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            service,
            identity,
            state: Mutex::new(StoreState::default()),
        }
    }

    fn current_user(&self) -> Option<UserIdentity> {
        let user = self.identity.current_user();
        if user.is_none() {
            lock(&self.state).error = Some(NO_USER.to_string());
        }
        user
    }

    fn record_error(&self, operation: &str, error: AppError) {
        tracing::warn!(operation, error = %error, "Running store operation failed");
        lock(&self.state).error = Some(error.to_string());
    }

    /// Logs a new run and prepends it to the local list.
    ///
    /// Returns the new session id, or `None` on failure.
    pub async fn create_session(&self, new_session: NewRunningSession) -> Option<i64> {
        let user = self.current_user()?;
        let _loading = LoadingGuard::begin(&self.state);

        match self.service.create(&user, new_session).await {
            Ok(session) => {
                let id = session.id;
                lock(&self.state).sessions.insert(0, session);
                Some(id)
            }
            Err(e) => {
                self.record_error("create_session", e);
                None
            }
        }
    }

    /// Replaces the local list with the user's sessions, newest first.
    pub async fn fetch_sessions(&self, limit: Option<i64>) {
        let Some(user) = self.current_user() else {
            return;
        };
        let _loading = LoadingGuard::begin(&self.state);

        match self.service.list(&user, limit).await {
            Ok(sessions) => lock(&self.state).sessions = sessions,
            Err(e) => self.record_error("fetch_sessions", e),
        }
    }

    /// Fetches one session. A session that does not exist yields `None`
    /// without recording an error.
    pub async fn get_session(&self, id: i64) -> Option<RunningSession> {
        let user = self.current_user()?;
        let _loading = LoadingGuard::begin(&self.state);

        match self.service.get(&user, id).await {
            Ok(session) => Some(session),
            Err(AppError::NotFound { .. }) => None,
            Err(e) => {
                self.record_error("get_session", e);
                None
            }
        }
    }

    /// Updates a session and refreshes its local copy.
    pub async fn update_session(&self, id: i64, patch: RunningSessionPatch) -> bool {
        let Some(user) = self.current_user() else {
            return false;
        };
        let _loading = LoadingGuard::begin(&self.state);

        match self.service.update(&user, id, patch).await {
            Ok(updated) => {
                let mut state = lock(&self.state);
                if let Some(local) = state.sessions.iter_mut().find(|s| s.id == id) {
                    *local = updated;
                }
                true
            }
            Err(e) => {
                self.record_error("update_session", e);
                false
            }
        }
    }

    /// Deletes a session and removes it from the local list.
    pub async fn delete_session(&self, id: i64) -> bool {
        let Some(user) = self.current_user() else {
            return false;
        };
        let _loading = LoadingGuard::begin(&self.state);

        match self.service.delete(&user, id).await {
            Ok(()) => {
                lock(&self.state).sessions.retain(|s| s.id != id);
                true
            }
            Err(e) => {
                self.record_error("delete_session", e);
                false
            }
        }
    }

    /// Drops all local state, e.g. on sign-out.
    pub fn clear_data(&self) {
        *lock(&self.state) = StoreState::default();
    }

    pub fn sessions(&self) -> Vec<RunningSession> {
        lock(&self.state).sessions.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn recent_sessions(&self) -> Vec<RunningSession> {
        summary::recent_sessions(&lock(&self.state).sessions).to_vec()
    }

    pub fn total_sessions(&self) -> usize {
        lock(&self.state).sessions.len()
    }

    pub fn week_sessions(&self, today: NaiveDate) -> Vec<RunningSession> {
        summary::week_sessions(&lock(&self.state).sessions, today)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn total_distance(&self) -> f64 {
        summary::total_distance(lock(&self.state).sessions.iter())
    }

    pub fn week_distance(&self, today: NaiveDate) -> f64 {
        let state = lock(&self.state);
        summary::total_distance(summary::week_sessions(&state.sessions, today).into_iter())
    }

    pub fn best_pace(&self) -> Option<String> {
        summary::best_pace(&lock(&self.state).sessions)
    }

    pub fn summary(&self, today: NaiveDate) -> RunningSummary {
        RunningSummary::from_sessions(&lock(&self.state).sessions, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RunType;
    use crate::domain::identity::StaticIdentity;
    use crate::domain::repositories::MockRunningSessionRepository;
    use chrono::Utc;
    use serde_json::json;

    fn session(id: i64, distance: f64, pace: &str) -> RunningSession {
        let now = Utc::now();
        RunningSession {
            id,
            user_uid: "runner-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
            run_type: RunType::EasyRun,
            distance: Some(distance),
            duration: None,
            average_pace: Some(pace.to_string()),
            intervals: None,
            race: None,
            segments: Vec::new(),
            notes: None,
            perceived_effort: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_session() -> NewRunningSession {
        NewRunningSession {
            user_uid: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 10, 13).unwrap(),
            run_type: RunType::Tempo,
            distance: Some(8.0),
            duration: Some(36.0),
            average_pace: None,
            intervals: None,
            race: None,
            segments: Vec::new(),
            notes: None,
            perceived_effort: None,
        }
    }

    fn store(
        repo: MockRunningSessionRepository,
        identity: StaticIdentity,
    ) -> RunningStore<MockRunningSessionRepository> {
        RunningStore::new(
            Arc::new(RunningService::new(Arc::new(repo))),
            Arc::new(identity),
        )
    }

    #[tokio::test]
    async fn test_fetch_sessions_populates_state() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_list_by_owner()
            .withf(|uid, limit| uid == "runner-1" && limit.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![session(2, 10.0, "4:30"), session(1, 5.0, "5:15")]));

        let store = store(repo, StaticIdentity::signed_in("runner-1"));
        store.fetch_sessions(None).await;

        assert_eq!(store.total_sessions(), 2);
        assert_eq!(store.total_distance(), 15.0);
        assert_eq!(store.best_pace().as_deref(), Some("4:30"));
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_fetch_failure_records_error_and_resets_loading() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_list_by_owner()
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let store = store(repo, StaticIdentity::signed_in("runner-1"));
        store.fetch_sessions(Some(10)).await;

        assert_eq!(store.error().as_deref(), Some("Database error"));
        assert!(!store.is_loading());
        assert!(store.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_operations_without_user() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_create().times(0);
        repo.expect_list_by_owner().times(0);
        repo.expect_delete().times(0);

        let store = store(repo, StaticIdentity::anonymous());

        assert_eq!(store.create_session(new_session()).await, None);
        assert_eq!(store.error().as_deref(), Some(NO_USER));

        store.fetch_sessions(None).await;
        assert!(!store.delete_session(1).await);
        assert!(!store.update_session(1, RunningSessionPatch::default()).await);
        assert_eq!(store.get_session(1).await, None);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_create_prepends_and_clears_previous_error() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_list_by_owner()
            .returning(|_, _| Ok(vec![session(1, 5.0, "5:15")]));
        repo.expect_create().times(1).returning(|_| Ok(session(2, 8.0, "4:30")));

        let store = store(repo, StaticIdentity::signed_in("runner-1"));
        store.fetch_sessions(None).await;
        lock(&store.state).error = Some("stale".to_string());

        let id = store.create_session(new_session()).await;

        assert_eq!(id, Some(2));
        assert_eq!(store.error(), None);
        assert_eq!(store.sessions()[0].id, 2);
        assert_eq!(store.total_sessions(), 2);
    }

    #[tokio::test]
    async fn test_create_validation_error_is_recorded() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_create().times(0);

        let store = store(repo, StaticIdentity::signed_in("runner-1"));
        let id = store
            .create_session(NewRunningSession {
                duration: Some(-5.0),
                ..new_session()
            })
            .await;

        assert_eq!(id, None);
        assert_eq!(
            store.error().as_deref(),
            Some("Duration must be greater than 0")
        );
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_update_replaces_local_copy() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_list_by_owner()
            .returning(|_, _| Ok(vec![session(1, 5.0, "5:15")]));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(session(id, 5.0, "5:15"))));
        repo.expect_update().times(1).returning(|id, patch| {
            let mut updated = session(id, 5.0, "5:15");
            updated.apply(patch);
            Ok(updated)
        });

        let store = store(repo, StaticIdentity::signed_in("runner-1"));
        store.fetch_sessions(None).await;

        let ok = store
            .update_session(
                1,
                RunningSessionPatch {
                    distance: Some(Some(6.0)),
                    ..Default::default()
                },
            )
            .await;

        assert!(ok);
        assert_eq!(store.sessions()[0].distance, Some(6.0));
    }

    #[tokio::test]
    async fn test_delete_removes_local_copy() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_list_by_owner()
            .returning(|_, _| Ok(vec![session(2, 10.0, "4:30"), session(1, 5.0, "5:15")]));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(session(id, 5.0, "5:15"))));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let store = store(repo, StaticIdentity::signed_in("runner-1"));
        store.fetch_sessions(None).await;

        assert!(store.delete_session(1).await);
        assert_eq!(store.total_sessions(), 1);
        assert_eq!(store.sessions()[0].id, 2);
    }

    #[tokio::test]
    async fn test_get_missing_session_is_not_an_error() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let store = store(repo, StaticIdentity::signed_in("runner-1"));

        assert_eq!(store.get_session(42).await, None);
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_week_getters_and_clear() {
        let mut repo = MockRunningSessionRepository::new();
        repo.expect_list_by_owner().returning(|_, _| {
            let mut old = session(1, 5.0, "5:15");
            old.date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
            Ok(vec![session(2, 10.0, "4:30"), old])
        });

        let store = store(repo, StaticIdentity::signed_in("runner-1"));
        store.fetch_sessions(None).await;

        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        assert_eq!(store.week_sessions(today).len(), 1);
        assert_eq!(store.week_distance(today), 10.0);
        assert_eq!(store.summary(today).total_sessions, 2);
        assert_eq!(store.recent_sessions().len(), 2);

        store.clear_data();
        assert_eq!(store.total_sessions(), 0);
        assert_eq!(store.error(), None);
    }
}
