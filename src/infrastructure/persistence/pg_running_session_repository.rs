//! PostgreSQL implementation of running session repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{
    IntervalSet, NewRunningSession, RaceResult, RunningSession, RunningSessionPatch,
};
use crate::domain::repositories::RunningSessionRepository;
use crate::error::AppError;
use crate::utils::pace::Segment;

/// PostgreSQL repository for running sessions.
///
/// Interval, race and segment data are stored as JSONB columns.
pub struct PgRunningSessionRepository {
    pool: Arc<PgPool>,
}

impl PgRunningSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RunningSessionRow {
    id: i64,
    user_uid: String,
    date: NaiveDate,
    run_type: String,
    distance: Option<f64>,
    duration: Option<f64>,
    average_pace: Option<String>,
    intervals: Option<Json<IntervalSet>>,
    race: Option<Json<RaceResult>>,
    segments: Json<Vec<Segment>>,
    notes: Option<String>,
    perceived_effort: Option<i16>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RunningSessionRow> for RunningSession {
    type Error = AppError;

    fn try_from(row: RunningSessionRow) -> Result<Self, Self::Error> {
        let run_type = row.run_type.parse().map_err(|reason: String| {
            tracing::error!(id = row.id, %reason, "Invalid run type in database");
            AppError::internal("Database error", json!({}))
        })?;

        Ok(RunningSession {
            id: row.id,
            user_uid: row.user_uid,
            date: row.date,
            run_type,
            distance: row.distance,
            duration: row.duration,
            average_pace: row.average_pace,
            intervals: row.intervals.map(|Json(v)| v),
            race: row.race.map(|Json(v)| v),
            segments: row.segments.0,
            notes: row.notes,
            perceived_effort: row.perceived_effort,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl RunningSessionRepository for PgRunningSessionRepository {
    async fn create(&self, new_session: NewRunningSession) -> Result<RunningSession, AppError> {
        let row = sqlx::query_as::<_, RunningSessionRow>(
            r#"
            INSERT INTO running_sessions (
                user_uid, date, run_type, distance, duration, average_pace,
                intervals, race, segments, notes, perceived_effort
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, user_uid, date, run_type, distance, duration, average_pace,
                      intervals, race, segments, notes, perceived_effort,
                      created_at, updated_at
            "#,
        )
        .bind(&new_session.user_uid)
        .bind(new_session.date)
        .bind(new_session.run_type.as_str())
        .bind(new_session.distance)
        .bind(new_session.duration)
        .bind(&new_session.average_pace)
        .bind(new_session.intervals.as_ref().map(Json))
        .bind(new_session.race.as_ref().map(Json))
        .bind(Json(&new_session.segments))
        .bind(&new_session.notes)
        .bind(new_session.perceived_effort)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<RunningSession>, AppError> {
        let rows = sqlx::query_as::<_, RunningSessionRow>(
            r#"
            SELECT id, user_uid, date, run_type, distance, duration, average_pace,
                   intervals, race, segments, notes, perceived_effort,
                   created_at, updated_at
            FROM running_sessions
            WHERE user_uid = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_uid)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(RunningSession::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RunningSession>, AppError> {
        let row = sqlx::query_as::<_, RunningSessionRow>(
            r#"
            SELECT id, user_uid, date, run_type, distance, duration, average_pace,
                   intervals, race, segments, notes, perceived_effort,
                   created_at, updated_at
            FROM running_sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(RunningSession::try_from).transpose()
    }

    async fn update(
        &self,
        id: i64,
        patch: RunningSessionPatch,
    ) -> Result<RunningSession, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, RunningSessionRow>(
            r#"
            SELECT id, user_uid, date, run_type, distance, duration, average_pace,
                   intervals, race, segments, notes, perceived_effort,
                   created_at, updated_at
            FROM running_sessions
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Running session not found", json!({ "id": id })))?;

        let mut session = RunningSession::try_from(current)?;
        session.apply(patch);

        let row = sqlx::query_as::<_, RunningSessionRow>(
            r#"
            UPDATE running_sessions
            SET date = $2, run_type = $3, distance = $4, duration = $5,
                average_pace = $6, intervals = $7, race = $8, segments = $9,
                notes = $10, perceived_effort = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_uid, date, run_type, distance, duration, average_pace,
                      intervals, race, segments, notes, perceived_effort,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(session.date)
        .bind(session.run_type.as_str())
        .bind(session.distance)
        .bind(session.duration)
        .bind(&session.average_pace)
        .bind(session.intervals.as_ref().map(Json))
        .bind(session.race.as_ref().map(Json))
        .bind(Json(&session.segments))
        .bind(&session.notes)
        .bind(session.perceived_effort)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.try_into()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM running_sessions WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
