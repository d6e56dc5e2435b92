//! PostgreSQL implementation of gym session repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{GymSession, GymSessionPatch, NewGymSession, WorkoutExercise};
use crate::domain::repositories::GymSessionRepository;
use crate::error::AppError;

/// PostgreSQL repository for gym sessions. Exercises and their sets are a
/// single JSONB column.
pub struct PgGymSessionRepository {
    pool: Arc<PgPool>,
}

impl PgGymSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct GymSessionRow {
    id: i64,
    user_uid: String,
    date: NaiveDate,
    exercises: Json<Vec<WorkoutExercise>>,
    duration: Option<f64>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GymSessionRow> for GymSession {
    fn from(row: GymSessionRow) -> Self {
        GymSession {
            id: row.id,
            user_uid: row.user_uid,
            date: row.date,
            exercises: row.exercises.0,
            duration: row.duration,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl GymSessionRepository for PgGymSessionRepository {
    async fn create(&self, new_session: NewGymSession) -> Result<GymSession, AppError> {
        let row = sqlx::query_as::<_, GymSessionRow>(
            r#"
            INSERT INTO gym_sessions (user_uid, date, exercises, duration, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_uid, date, exercises, duration, notes, created_at, updated_at
            "#,
        )
        .bind(&new_session.user_uid)
        .bind(new_session.date)
        .bind(Json(&new_session.exercises))
        .bind(new_session.duration)
        .bind(&new_session.notes)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<GymSession>, AppError> {
        let rows = sqlx::query_as::<_, GymSessionRow>(
            r#"
            SELECT id, user_uid, date, exercises, duration, notes, created_at, updated_at
            FROM gym_sessions
            WHERE user_uid = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_uid)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(GymSession::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GymSession>, AppError> {
        let row = sqlx::query_as::<_, GymSessionRow>(
            r#"
            SELECT id, user_uid, date, exercises, duration, notes, created_at, updated_at
            FROM gym_sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(GymSession::from))
    }

    async fn update(&self, id: i64, patch: GymSessionPatch) -> Result<GymSession, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut session: GymSession = sqlx::query_as::<_, GymSessionRow>(
            r#"
            SELECT id, user_uid, date, exercises, duration, notes, created_at, updated_at
            FROM gym_sessions
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Gym session not found", json!({ "id": id })))?
        .into();

        session.apply(patch);

        let row = sqlx::query_as::<_, GymSessionRow>(
            r#"
            UPDATE gym_sessions
            SET date = $2, exercises = $3, duration = $4, notes = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_uid, date, exercises, duration, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(session.date)
        .bind(Json(&session.exercises))
        .bind(session.duration)
        .bind(&session.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM gym_sessions WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
