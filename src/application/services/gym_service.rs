//! Gym session service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{GymSession, GymSessionPatch, NewGymSession, WorkoutExercise};
use crate::domain::identity::UserIdentity;
use crate::domain::repositories::{ExerciseRepository, GymSessionRepository};
use crate::error::AppError;

/// Service for logging gym workouts.
///
/// Exercises referenced by a session must exist in the user's catalog.
pub struct GymService<
    G: ?Sized = dyn GymSessionRepository,
    E: ?Sized = dyn ExerciseRepository,
> {
    sessions: Arc<G>,
    exercises: Arc<E>,
}

impl<G, E> GymService<G, E>
where
    G: GymSessionRepository + ?Sized,
    E: ExerciseRepository + ?Sized,
{
    pub fn new(sessions: Arc<G>, exercises: Arc<E>) -> Self {
        Self {
            sessions,
            exercises,
        }
    }

    /// Logs a gym session for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the duration is not positive, a set
    /// has zero reps or negative weight, or an exercise is not in the user's
    /// catalog.
    pub async fn create(
        &self,
        user: &UserIdentity,
        mut new_session: NewGymSession,
    ) -> Result<GymSession, AppError> {
        new_session.user_uid = user.uid.clone();
        validate_duration(new_session.duration)?;
        self.validate_exercises(user, &new_session.exercises).await?;

        let session = self.sessions.create(new_session).await?;

        metrics::counter!("gym_sessions_created_total").increment(1);
        tracing::info!(id = session.id, user = %user.uid, "Gym session created");

        Ok(session)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is not positive.
    pub async fn list(
        &self,
        user: &UserIdentity,
        limit: Option<i64>,
    ) -> Result<Vec<GymSession>, AppError> {
        if let Some(limit) = limit
            && limit <= 0
        {
            return Err(AppError::bad_request(
                "Limit must be greater than 0",
                json!({ "limit": limit }),
            ));
        }

        self.sessions.list_by_owner(&user.uid, limit).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session is not the user's.
    pub async fn get(&self, user: &UserIdentity, id: i64) -> Result<GymSession, AppError> {
        self.sessions
            .find_by_id(id)
            .await?
            .filter(|session| session.user_uid == user.uid)
            .ok_or_else(|| not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session is not the user's.
    /// Returns [`AppError::Validation`] for invalid values.
    pub async fn update(
        &self,
        user: &UserIdentity,
        id: i64,
        patch: GymSessionPatch,
    ) -> Result<GymSession, AppError> {
        validate_duration(patch.duration.flatten())?;
        if let Some(exercises) = &patch.exercises {
            self.validate_exercises(user, exercises).await?;
        }

        self.get(user, id).await?;
        self.sessions.update(id, patch).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session is not the user's.
    pub async fn delete(&self, user: &UserIdentity, id: i64) -> Result<(), AppError> {
        self.get(user, id).await?;

        if !self.sessions.delete(id).await? {
            return Err(not_found(id));
        }

        metrics::counter!("gym_sessions_deleted_total").increment(1);
        tracing::info!(id, user = %user.uid, "Gym session deleted");

        Ok(())
    }

    async fn validate_exercises(
        &self,
        user: &UserIdentity,
        exercises: &[WorkoutExercise],
    ) -> Result<(), AppError> {
        for exercise in exercises {
            for set in &exercise.sets {
                if set.reps == 0 {
                    return Err(AppError::bad_request(
                        "Sets must have at least one rep",
                        json!({ "exercise_id": exercise.exercise_id }),
                    ));
                }
                if !(set.weight.is_finite() && set.weight >= 0.0) {
                    return Err(AppError::bad_request(
                        "Set weight must not be negative",
                        json!({ "exercise_id": exercise.exercise_id, "weight": set.weight }),
                    ));
                }
            }

            let owned = self
                .exercises
                .find_by_id(exercise.exercise_id)
                .await?
                .is_some_and(|e| e.user_uid == user.uid);
            if !owned {
                return Err(AppError::bad_request(
                    "Unknown exercise",
                    json!({ "exercise_id": exercise.exercise_id }),
                ));
            }
        }

        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Gym session not found", json!({ "id": id }))
}

fn validate_duration(duration: Option<f64>) -> Result<(), AppError> {
    if let Some(duration) = duration
        && !(duration.is_finite() && duration > 0.0)
    {
        return Err(AppError::bad_request(
            "Duration must be greater than 0",
            json!({ "duration": duration }),
        ));
    }
    Ok(())
}
