//! Handlers for gym session endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::gym::{CreateGymSessionRequest, GymSessionResponse, UpdateGymSessionRequest};
use crate::api::dto::query::ListParams;
use crate::domain::identity::UserIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Logs a gym session.
///
/// # Endpoint
///
/// `POST /api/gym/sessions`
///
/// Every `exercise_id` must refer to an exercise in the caller's catalog.
pub async fn create_gym_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateGymSessionRequest>,
) -> Result<(StatusCode, Json<GymSessionResponse>), AppError> {
    payload.validate()?;

    let session = state.gym_service.create(&user, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

pub async fn list_gym_sessions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<GymSessionResponse>>, AppError> {
    let sessions = state.gym_service.list(&user, params.limit).await?;

    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

pub async fn get_gym_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> Result<Json<GymSessionResponse>, AppError> {
    let session = state.gym_service.get(&user, id).await?;

    Ok(Json(session.into()))
}

pub async fn update_gym_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateGymSessionRequest>,
) -> Result<Json<GymSessionResponse>, AppError> {
    payload.validate()?;

    let session = state.gym_service.update(&user, id, payload.into()).await?;

    Ok(Json(session.into()))
}

pub async fn delete_gym_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.gym_service.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
