//! In-process storage backend.
//!
//! Used when no `DATABASE_URL` is configured and by the integration tests.
//! Data lives only as long as the process.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{
    Exercise, ExercisePatch, GymSession, GymSessionPatch, NewExercise, NewGymSession,
    NewRunningSession, RunningSession, RunningSessionPatch,
};
use crate::domain::repositories::{
    ApiToken, ExerciseRepository, GymSessionRepository, RunningSessionRepository,
    TokenRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    next_id: i64,
    running_sessions: BTreeMap<i64, RunningSession>,
    gym_sessions: BTreeMap<i64, GymSession>,
    exercises: BTreeMap<i64, Exercise>,
    api_tokens: BTreeMap<i64, ApiToken>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Implements every repository trait over a set of in-memory maps.
///
/// Ids come from a single counter shared by all collections, so they are
/// unique across document kinds.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory storage");
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Newest first; the id breaks ties between documents created in the same instant.
fn newest_first<T: Clone>(
    docs: impl Iterator<Item = T>,
    key: impl Fn(&T) -> (DateTime<Utc>, i64),
    limit: Option<i64>,
) -> Vec<T> {
    let mut docs: Vec<T> = docs.collect();
    docs.sort_by_key(|doc| std::cmp::Reverse(key(doc)));
    if let Some(limit) = limit {
        docs.truncate(usize::try_from(limit).unwrap_or(0));
    }
    docs
}

fn missing(kind: &str, id: i64) -> AppError {
    AppError::not_found(format!("{kind} not found"), json!({ "id": id }))
}

#[async_trait]
impl RunningSessionRepository for InMemoryStore {
    async fn create(&self, new_session: NewRunningSession) -> Result<RunningSession, AppError> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let now = Utc::now();

        let session = RunningSession {
            id,
            user_uid: new_session.user_uid,
            date: new_session.date,
            run_type: new_session.run_type,
            distance: new_session.distance,
            duration: new_session.duration,
            average_pace: new_session.average_pace,
            intervals: new_session.intervals,
            race: new_session.race,
            segments: new_session.segments,
            notes: new_session.notes,
            perceived_effort: new_session.perceived_effort,
            created_at: now,
            updated_at: now,
        };
        tables.running_sessions.insert(id, session.clone());

        Ok(session)
    }

    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<RunningSession>, AppError> {
        let tables = self.tables();
        Ok(newest_first(
            tables
                .running_sessions
                .values()
                .filter(|s| s.user_uid == user_uid)
                .cloned(),
            |s| (s.created_at, s.id),
            limit,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RunningSession>, AppError> {
        Ok(self.tables().running_sessions.get(&id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        patch: RunningSessionPatch,
    ) -> Result<RunningSession, AppError> {
        let mut tables = self.tables();
        let session = tables
            .running_sessions
            .get_mut(&id)
            .ok_or_else(|| missing("Running session", id))?;

        session.apply(patch);
        session.updated_at = Utc::now();

        Ok(session.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables().running_sessions.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl GymSessionRepository for InMemoryStore {
    async fn create(&self, new_session: NewGymSession) -> Result<GymSession, AppError> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let now = Utc::now();

        let session = GymSession {
            id,
            user_uid: new_session.user_uid,
            date: new_session.date,
            exercises: new_session.exercises,
            duration: new_session.duration,
            notes: new_session.notes,
            created_at: now,
            updated_at: now,
        };
        tables.gym_sessions.insert(id, session.clone());

        Ok(session)
    }

    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<GymSession>, AppError> {
        let tables = self.tables();
        Ok(newest_first(
            tables
                .gym_sessions
                .values()
                .filter(|s| s.user_uid == user_uid)
                .cloned(),
            |s| (s.created_at, s.id),
            limit,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GymSession>, AppError> {
        Ok(self.tables().gym_sessions.get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: GymSessionPatch) -> Result<GymSession, AppError> {
        let mut tables = self.tables();
        let session = tables
            .gym_sessions
            .get_mut(&id)
            .ok_or_else(|| missing("Gym session", id))?;

        session.apply(patch);
        session.updated_at = Utc::now();

        Ok(session.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables().gym_sessions.remove(&id).is_some())
    }
}

fn name_taken(tables: &Tables, user_uid: &str, name: &str, except: Option<i64>) -> bool {
    tables
        .exercises
        .values()
        .any(|e| e.user_uid == user_uid && e.name == name && Some(e.id) != except)
}

fn duplicate_exercise(name: &str) -> AppError {
    AppError::conflict(
        "Exercise already exists",
        json!({ "name": name }),
    )
}

#[async_trait]
impl ExerciseRepository for InMemoryStore {
    async fn create(&self, new_exercise: NewExercise) -> Result<Exercise, AppError> {
        let mut tables = self.tables();
        if name_taken(&tables, &new_exercise.user_uid, &new_exercise.name, None) {
            return Err(duplicate_exercise(&new_exercise.name));
        }

        let id = tables.next_id();
        let now = Utc::now();
        let exercise = Exercise {
            id,
            user_uid: new_exercise.user_uid,
            name: new_exercise.name,
            category: new_exercise.category,
            muscle_groups: new_exercise.muscle_groups,
            is_custom: new_exercise.is_custom,
            created_at: now,
            updated_at: now,
        };
        tables.exercises.insert(id, exercise.clone());

        Ok(exercise)
    }

    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Exercise>, AppError> {
        let tables = self.tables();
        Ok(newest_first(
            tables
                .exercises
                .values()
                .filter(|e| e.user_uid == user_uid)
                .cloned(),
            |e| (e.created_at, e.id),
            limit,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Exercise>, AppError> {
        Ok(self.tables().exercises.get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: ExercisePatch) -> Result<Exercise, AppError> {
        let mut tables = self.tables();
        let owner = tables
            .exercises
            .get(&id)
            .map(|e| e.user_uid.clone())
            .ok_or_else(|| missing("Exercise", id))?;

        if let Some(name) = &patch.name
            && name_taken(&tables, &owner, name, Some(id))
        {
            return Err(duplicate_exercise(name));
        }

        let exercise = tables
            .exercises
            .get_mut(&id)
            .ok_or_else(|| missing("Exercise", id))?;
        exercise.apply(patch);
        exercise.updated_at = Utc::now();

        Ok(exercise.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables().exercises.remove(&id).is_some())
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn find_owner(&self, token_hash: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .tables()
            .api_tokens
            .values()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
            .map(|t| t.user_uid.clone()))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tables = self.tables();
        if let Some(token) = tables
            .api_tokens
            .values_mut()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        name: &str,
        user_uid: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut tables = self.tables();
        if tables
            .api_tokens
            .values()
            .any(|t| t.name == name || t.token_hash == token_hash)
        {
            return Err(AppError::conflict(
                "Token already exists",
                json!({ "name": name }),
            ));
        }

        let id = tables.next_id();
        let token = ApiToken {
            id,
            name: name.to_string(),
            user_uid: user_uid.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tables.api_tokens.insert(id, token.clone());

        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let tables = self.tables();
        Ok(newest_first(
            tables.api_tokens.values().cloned(),
            |t| (t.created_at, t.id),
            None,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self.tables().api_tokens.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tables()
            .api_tokens
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        if let Some(token) = self.tables().api_tokens.get_mut(&id)
            && token.revoked_at.is_none()
        {
            token.revoked_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ExerciseCategory, RunType};
    use chrono::NaiveDate;

    fn new_run(user_uid: &str, distance: f64) -> NewRunningSession {
        NewRunningSession {
            user_uid: user_uid.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            run_type: RunType::EasyRun,
            distance: Some(distance),
            duration: None,
            average_pace: None,
            intervals: None,
            race: None,
            segments: Vec::new(),
            notes: None,
            perceived_effort: None,
        }
    }

    fn new_exercise(user_uid: &str, name: &str) -> NewExercise {
        NewExercise {
            user_uid: user_uid.to_string(),
            name: name.to_string(),
            category: ExerciseCategory::Strength,
            muscle_groups: vec!["legs".to_string()],
            is_custom: true,
        }
    }

    #[tokio::test]
    async fn test_running_list_is_newest_first_and_scoped() {
        let store = InMemoryStore::new();
        let first = RunningSessionRepository::create(&store, new_run("a", 5.0))
            .await
            .unwrap();
        let second = RunningSessionRepository::create(&store, new_run("a", 10.0))
            .await
            .unwrap();
        RunningSessionRepository::create(&store, new_run("b", 3.0))
            .await
            .unwrap();

        let listed = RunningSessionRepository::list_by_owner(&store, "a", None)
            .await
            .unwrap();
        let ids: Vec<i64> = listed.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let limited = RunningSessionRepository::list_by_owner(&store, "a", Some(1))
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, second.id);
    }

    #[tokio::test]
    async fn test_running_update_and_delete() {
        let store = InMemoryStore::new();
        let created = RunningSessionRepository::create(&store, new_run("a", 5.0))
            .await
            .unwrap();

        let updated = RunningSessionRepository::update(
            &store,
            created.id,
            RunningSessionPatch {
                notes: Some(Some("windy".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("windy"));
        assert_eq!(updated.distance, Some(5.0));
        assert!(updated.updated_at >= created.updated_at);

        assert!(RunningSessionRepository::delete(&store, created.id).await.unwrap());
        assert!(!RunningSessionRepository::delete(&store, created.id).await.unwrap());

        let result =
            RunningSessionRepository::update(&store, created.id, RunningSessionPatch::default())
                .await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_exercise_names_unique_per_user() {
        let store = InMemoryStore::new();
        ExerciseRepository::create(&store, new_exercise("a", "Squat"))
            .await
            .unwrap();

        let duplicate = ExerciseRepository::create(&store, new_exercise("a", "Squat")).await;
        assert!(matches!(duplicate.unwrap_err(), AppError::Conflict { .. }));

        ExerciseRepository::create(&store, new_exercise("b", "Squat"))
            .await
            .unwrap();

        let bench = ExerciseRepository::create(&store, new_exercise("a", "Bench"))
            .await
            .unwrap();
        let rename = ExerciseRepository::update(
            &store,
            bench.id,
            ExercisePatch {
                name: Some("Squat".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(rename.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let store = InMemoryStore::new();
        let token = store.create_token("ci", "runner-1", "hash-1").await.unwrap();

        assert_eq!(
            store.find_owner("hash-1").await.unwrap().as_deref(),
            Some("runner-1")
        );

        store.update_last_used("hash-1").await.unwrap();
        let stored = TokenRepository::find_by_id(&store, token.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.last_used_at.is_some());

        let duplicate = store.create_token("ci", "runner-2", "hash-2").await;
        assert!(matches!(duplicate.unwrap_err(), AppError::Conflict { .. }));

        store.revoke_token(token.id).await.unwrap();
        assert_eq!(store.find_owner("hash-1").await.unwrap(), None);
        assert!(store.find_by_name("ci").await.unwrap().unwrap().revoked_at.is_some());
    }
}
