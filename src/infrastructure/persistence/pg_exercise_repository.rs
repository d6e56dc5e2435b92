//! PostgreSQL implementation of exercise repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Exercise, ExercisePatch, NewExercise};
use crate::domain::repositories::ExerciseRepository;
use crate::error::AppError;

/// PostgreSQL repository for the exercise catalog.
///
/// Names are unique per user (`exercises_owner_name_key`); violations surface
/// as [`AppError::Conflict`].
pub struct PgExerciseRepository {
    pool: Arc<PgPool>,
}

impl PgExerciseRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ExerciseRow {
    id: i64,
    user_uid: String,
    name: String,
    category: String,
    muscle_groups: Vec<String>,
    is_custom: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ExerciseRow> for Exercise {
    type Error = AppError;

    fn try_from(row: ExerciseRow) -> Result<Self, Self::Error> {
        let category = row.category.parse().map_err(|reason: String| {
            tracing::error!(id = row.id, %reason, "Invalid exercise category in database");
            AppError::internal("Database error", json!({}))
        })?;

        Ok(Exercise {
            id: row.id,
            user_uid: row.user_uid,
            name: row.name,
            category,
            muscle_groups: row.muscle_groups,
            is_custom: row.is_custom,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ExerciseRepository for PgExerciseRepository {
    async fn create(&self, new_exercise: NewExercise) -> Result<Exercise, AppError> {
        let row = sqlx::query_as::<_, ExerciseRow>(
            r#"
            INSERT INTO exercises (user_uid, name, category, muscle_groups, is_custom)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_uid, name, category, muscle_groups, is_custom,
                      created_at, updated_at
            "#,
        )
        .bind(&new_exercise.user_uid)
        .bind(&new_exercise.name)
        .bind(new_exercise.category.as_str())
        .bind(&new_exercise.muscle_groups)
        .bind(new_exercise.is_custom)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn list_by_owner(
        &self,
        user_uid: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Exercise>, AppError> {
        let rows = sqlx::query_as::<_, ExerciseRow>(
            r#"
            SELECT id, user_uid, name, category, muscle_groups, is_custom,
                   created_at, updated_at
            FROM exercises
            WHERE user_uid = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_uid)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Exercise::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Exercise>, AppError> {
        let row = sqlx::query_as::<_, ExerciseRow>(
            r#"
            SELECT id, user_uid, name, category, muscle_groups, is_custom,
                   created_at, updated_at
            FROM exercises
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Exercise::try_from).transpose()
    }

    async fn update(&self, id: i64, patch: ExercisePatch) -> Result<Exercise, AppError> {
        let row = sqlx::query_as::<_, ExerciseRow>(
            r#"
            UPDATE exercises
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                muscle_groups = COALESCE($4, muscle_groups),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_uid, name, category, muscle_groups, is_custom,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.category.map(|c| c.as_str()))
        .bind(patch.muscle_groups.as_deref())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Exercise not found", json!({ "id": id })))?;

        row.try_into()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
