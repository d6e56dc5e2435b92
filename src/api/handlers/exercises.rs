//! Handlers for the exercise catalog.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::exercise::{CreateExerciseRequest, ExerciseResponse, UpdateExerciseRequest};
use crate::domain::identity::UserIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Adds an exercise to the caller's catalog.
///
/// # Endpoint
///
/// `POST /api/exercises`
///
/// # Errors
///
/// Returns 409 Conflict if the caller already has an exercise with this name.
pub async fn create_exercise_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<ExerciseResponse>), AppError> {
    payload.validate()?;

    let exercise = state.exercise_service.create(&user, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(exercise.into())))
}

pub async fn list_exercises_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Result<Json<Vec<ExerciseResponse>>, AppError> {
    let exercises = state.exercise_service.list(&user).await?;

    Ok(Json(exercises.into_iter().map(Into::into).collect()))
}

pub async fn get_exercise_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> Result<Json<ExerciseResponse>, AppError> {
    let exercise = state.exercise_service.get(&user, id).await?;

    Ok(Json(exercise.into()))
}

pub async fn update_exercise_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateExerciseRequest>,
) -> Result<Json<ExerciseResponse>, AppError> {
    payload.validate()?;

    let exercise = state
        .exercise_service
        .update(&user, id, payload.into())
        .await?;

    Ok(Json(exercise.into()))
}

pub async fn delete_exercise_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.exercise_service.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
