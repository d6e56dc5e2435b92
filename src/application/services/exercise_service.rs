//! Exercise catalog service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Exercise, ExercisePatch, NewExercise};
use crate::domain::identity::UserIdentity;
use crate::domain::repositories::ExerciseRepository;
use crate::error::AppError;

/// Service for managing a user's exercise catalog.
pub struct ExerciseService<R: ?Sized = dyn ExerciseRepository> {
    repository: Arc<R>,
}

impl<R: ExerciseRepository + ?Sized> ExerciseService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Adds an exercise to the user's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank.
    /// Returns [`AppError::Conflict`] if the name is already in the catalog.
    pub async fn create(
        &self,
        user: &UserIdentity,
        mut new_exercise: NewExercise,
    ) -> Result<Exercise, AppError> {
        new_exercise.user_uid = user.uid.clone();
        new_exercise.name = normalize_name(&new_exercise.name)?;
        new_exercise.muscle_groups = normalize_muscle_groups(new_exercise.muscle_groups);

        let exercise = self.repository.create(new_exercise).await?;
        tracing::info!(id = exercise.id, user = %user.uid, "Exercise created");

        Ok(exercise)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self, user: &UserIdentity) -> Result<Vec<Exercise>, AppError> {
        self.repository.list_by_owner(&user.uid, None).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the exercise is not the user's.
    pub async fn get(&self, user: &UserIdentity, id: i64) -> Result<Exercise, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|exercise| exercise.user_uid == user.uid)
            .ok_or_else(|| not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the exercise is not the user's.
    /// Returns [`AppError::Validation`] if the new name is blank.
    pub async fn update(
        &self,
        user: &UserIdentity,
        id: i64,
        mut patch: ExercisePatch,
    ) -> Result<Exercise, AppError> {
        if let Some(name) = &patch.name {
            patch.name = Some(normalize_name(name)?);
        }
        patch.muscle_groups = patch.muscle_groups.map(normalize_muscle_groups);

        self.get(user, id).await?;
        self.repository.update(id, patch).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the exercise is not the user's.
    pub async fn delete(&self, user: &UserIdentity, id: i64) -> Result<(), AppError> {
        self.get(user, id).await?;

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(id, user = %user.uid, "Exercise deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Exercise not found", json!({ "id": id }))
}

fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request(
            "Exercise name must not be empty",
            json!({}),
        ));
    }
    Ok(name.to_string())
}

/// Lowercases and de-duplicates muscle groups, keeping first-seen order.
fn normalize_muscle_groups(groups: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(groups.len());
    for group in groups {
        let group = group.trim().to_lowercase();
        if !group.is_empty() && !normalized.contains(&group) {
            normalized.push(group);
        }
    }
    normalized
}
