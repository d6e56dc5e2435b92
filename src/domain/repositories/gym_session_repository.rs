//! Repository trait for gym session documents.

use crate::domain::entities::{GymSession, GymSessionPatch, NewGymSession};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for gym sessions.
///
/// Same document semantics as
/// [`crate::domain::repositories::RunningSessionRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GymSessionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_session: NewGymSession) -> Result<GymSession, AppError>;

    /// Lists a user's sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<GymSession>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<GymSession>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, id: i64, patch: GymSessionPatch) -> Result<GymSession, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
