//! Running session service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use crate::application::services::summary::RunningSummary;
use crate::domain::entities::{NewRunningSession, RunningSession, RunningSessionPatch};
use crate::domain::identity::UserIdentity;
use crate::domain::repositories::RunningSessionRepository;
use crate::error::AppError;
use crate::utils::pace::{Segment, parse_pace};

/// Service for logging and querying a user's runs.
///
/// Every operation is scoped to the calling user. A session that belongs to
/// somebody else is reported as not found.
pub struct RunningService<R: ?Sized = dyn RunningSessionRepository> {
    repository: Arc<R>,
}

impl<R: RunningSessionRepository + ?Sized> RunningService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Logs a new run for `user`, deriving missing distance, duration or pace.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a quantity is not positive, a pace
    /// is not `M:SS`, or perceived effort is outside 1-10.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create(
        &self,
        user: &UserIdentity,
        mut new_session: NewRunningSession,
    ) -> Result<RunningSession, AppError> {
        new_session.user_uid = user.uid.clone();
        validate_metrics(
            new_session.distance,
            new_session.duration,
            new_session.average_pace.as_deref(),
            new_session.perceived_effort,
        )?;
        validate_segments(&new_session.segments)?;

        let session = self
            .repository
            .create(new_session.with_derived_metrics())
            .await?;

        metrics::counter!("running_sessions_created_total").increment(1);
        tracing::info!(id = session.id, user = %user.uid, "Running session created");

        Ok(session)
    }

    /// Lists the user's runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is not positive.
    pub async fn list(
        &self,
        user: &UserIdentity,
        limit: Option<i64>,
    ) -> Result<Vec<RunningSession>, AppError> {
        if let Some(limit) = limit
            && limit <= 0
        {
            return Err(AppError::bad_request(
                "Limit must be greater than 0",
                json!({ "limit": limit }),
            ));
        }

        self.repository.list_by_owner(&user.uid, limit).await
    }

    /// Fetches one of the user's runs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session does not exist or belongs
    /// to another user.
    pub async fn get(&self, user: &UserIdentity, id: i64) -> Result<RunningSession, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|session| session.user_uid == user.uid)
            .ok_or_else(|| not_found(id))
    }

    /// Partially updates one of the user's runs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session is not the user's.
    /// Returns [`AppError::Validation`] for invalid metric values.
    pub async fn update(
        &self,
        user: &UserIdentity,
        id: i64,
        patch: RunningSessionPatch,
    ) -> Result<RunningSession, AppError> {
        validate_metrics(
            patch.distance.flatten(),
            patch.duration.flatten(),
            patch.average_pace.as_ref().and_then(|p| p.as_deref()),
            patch.perceived_effort.flatten(),
        )?;
        if let Some(segments) = &patch.segments {
            validate_segments(segments)?;
        }

        self.get(user, id).await?;
        self.repository.update(id, patch).await
    }

    /// Deletes one of the user's runs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session is not the user's.
    pub async fn delete(&self, user: &UserIdentity, id: i64) -> Result<(), AppError> {
        self.get(user, id).await?;

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        metrics::counter!("running_sessions_deleted_total").increment(1);
        tracing::info!(id, user = %user.uid, "Running session deleted");

        Ok(())
    }

    /// Builds the running summary over all of the user's sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn summary(
        &self,
        user: &UserIdentity,
        today: NaiveDate,
    ) -> Result<RunningSummary, AppError> {
        let sessions = self.repository.list_by_owner(&user.uid, None).await?;
        Ok(RunningSummary::from_sessions(&sessions, today))
    }

    /// Checks that the backing store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Running session not found", json!({ "id": id }))
}

fn validate_metrics(
    distance: Option<f64>,
    duration: Option<f64>,
    pace: Option<&str>,
    perceived_effort: Option<i16>,
) -> Result<(), AppError> {
    if let Some(distance) = distance
        && !(distance.is_finite() && distance > 0.0)
    {
        return Err(AppError::bad_request(
            "Distance must be greater than 0",
            json!({ "distance": distance }),
        ));
    }

    if let Some(duration) = duration
        && !(duration.is_finite() && duration > 0.0)
    {
        return Err(AppError::bad_request(
            "Duration must be greater than 0",
            json!({ "duration": duration }),
        ));
    }

    if let Some(pace) = pace
        && parse_pace(pace).is_none_or(|s| s == 0)
    {
        return Err(AppError::bad_request(
            "Pace must be in M:SS format",
            json!({ "pace": pace }),
        ));
    }

    if let Some(effort) = perceived_effort
        && !(1..=10).contains(&effort)
    {
        return Err(AppError::bad_request(
            "Perceived effort must be between 1 and 10",
            json!({ "perceived_effort": effort }),
        ));
    }

    Ok(())
}

fn validate_segments(segments: &[Segment]) -> Result<(), AppError> {
    for (index, segment) in segments.iter().enumerate() {
        if !(segment.duration.is_finite() && segment.duration >= 0.0) {
            return Err(AppError::bad_request(
                "Segment duration must not be negative",
                json!({ "segment": index }),
            ));
        }
        if let Some(distance) = segment.distance
            && !(distance.is_finite() && distance >= 0.0)
        {
            return Err(AppError::bad_request(
                "Segment distance must not be negative",
                json!({ "segment": index }),
            ));
        }
        if let Some(pace) = segment.pace.as_deref()
            && parse_pace(pace).is_none_or(|s| s == 0)
        {
            return Err(AppError::bad_request(
                "Segment pace must be in M:SS format",
                json!({ "segment": index, "pace": pace }),
            ));
        }
    }

    Ok(())
}
