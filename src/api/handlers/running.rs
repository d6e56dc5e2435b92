//! Handlers for running session endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::query::ListParams;
use crate::api::dto::running::{
    CreateRunningSessionRequest, RunningSessionResponse, RunningSummaryResponse,
    UpdateRunningSessionRequest,
};
use crate::domain::identity::UserIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Logs a run.
///
/// # Endpoint
///
/// `POST /api/running/sessions`
///
/// # Request Body
///
/// ```json
/// {
///   "date": "2026-10-12",
///   "run_type": "tempo",
///   "distance": 8.0,
///   "duration": 36.0,
///   "perceived_effort": 7
/// }
/// ```
///
/// Missing distance, duration or pace is derived when possible.
///
/// # Errors
///
/// Returns 400 Bad Request on invalid input.
pub async fn create_running_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateRunningSessionRequest>,
) -> Result<(StatusCode, Json<RunningSessionResponse>), AppError> {
    payload.validate()?;

    let session = state
        .running_service
        .create(&user, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// `GET /api/running/sessions?limit=N`, newest first.
pub async fn list_running_sessions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<RunningSessionResponse>>, AppError> {
    let sessions = state.running_service.list(&user, params.limit).await?;

    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

/// `GET /api/running/sessions/{id}`
pub async fn get_running_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> Result<Json<RunningSessionResponse>, AppError> {
    let session = state.running_service.get(&user, id).await?;

    Ok(Json(session.into()))
}

/// Partially updates a run.
///
/// # Endpoint
///
/// `PATCH /api/running/sessions/{id}`
///
/// Absent fields are left unchanged; `null` clears optional fields.
pub async fn update_running_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRunningSessionRequest>,
) -> Result<Json<RunningSessionResponse>, AppError> {
    payload.validate()?;

    let session = state
        .running_service
        .update(&user, id, payload.into())
        .await?;

    Ok(Json(session.into()))
}

/// `DELETE /api/running/sessions/{id}`, `204 No Content` on success.
pub async fn delete_running_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.running_service.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Totals, weekly figures and best pace over all of the user's runs.
///
/// # Endpoint
///
/// `GET /api/running/summary`
///
/// The week starts on Sunday (UTC).
pub async fn running_summary_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Result<Json<RunningSummaryResponse>, AppError> {
    let today = Utc::now().date_naive();
    let summary = state.running_service.summary(&user, today).await?;

    Ok(Json(summary.into()))
}
