//! Repository trait for running session documents.

use crate::domain::entities::{NewRunningSession, RunningSession, RunningSessionPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for running sessions.
///
/// Documents are keyed by id and owned by a user; ownership checks are done by
/// [`crate::application::services::RunningService`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRunningSessionRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RunningSessionRepository: Send + Sync {
    /// Stores a new session, assigning id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_session: NewRunningSession) -> Result<RunningSession, AppError>;

    /// Lists a user's sessions, newest first, optionally truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<RunningSession>, AppError>;

    /// Finds a session by id regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<RunningSession>, AppError>;

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(
        &self,
        id: i64,
        patch: RunningSessionPatch,
    ) -> Result<RunningSession, AppError>;

    /// Deletes a session. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
