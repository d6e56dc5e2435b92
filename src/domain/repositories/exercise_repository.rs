//! Repository trait for the exercise catalog.

use crate::domain::entities::{Exercise, ExercisePatch, NewExercise};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for exercises.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Adds an exercise to a user's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has an exercise with this name.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_exercise: NewExercise) -> Result<Exercise, AppError>;

    /// Lists a user's exercises, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Exercise>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Exercise>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the exercise does not exist.
    /// Returns [`AppError::Conflict`] if the new name is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, id: i64, patch: ExercisePatch) -> Result<Exercise, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
