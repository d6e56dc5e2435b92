//! API route configuration.
//!
//! Session and catalog endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]; the pace calculator is public.

use crate::api::handlers::{
    aggregate_handler, create_exercise_handler, create_gym_session_handler,
    create_running_session_handler, delete_exercise_handler, delete_gym_session_handler,
    delete_running_session_handler, distance_handler, get_exercise_handler,
    get_gym_session_handler, get_running_session_handler, list_exercises_handler,
    list_gym_sessions_handler, list_running_sessions_handler, pace_handler,
    running_summary_handler, time_handler, update_exercise_handler, update_gym_session_handler,
    update_running_session_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /running/sessions`       - List runs (`?limit=N`)
/// - `POST   /running/sessions`       - Log a run
/// - `GET    /running/sessions/{id}`  - Fetch a run
/// - `PATCH  /running/sessions/{id}`  - Partially update a run
/// - `DELETE /running/sessions/{id}`  - Delete a run
/// - `GET    /running/summary`        - Totals, weekly figures, best pace
/// - `GET    /gym/sessions`           - List gym sessions (`?limit=N`)
/// - `POST   /gym/sessions`           - Log a gym session
/// - `GET|PATCH|DELETE /gym/sessions/{id}`
/// - `GET    /exercises`              - List the exercise catalog
/// - `POST   /exercises`              - Add an exercise
/// - `GET|PATCH|DELETE /exercises/{id}`
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/running/sessions",
            get(list_running_sessions_handler).post(create_running_session_handler),
        )
        .route(
            "/running/sessions/{id}",
            get(get_running_session_handler)
                .patch(update_running_session_handler)
                .delete(delete_running_session_handler),
        )
        .route("/running/summary", get(running_summary_handler))
        .route(
            "/gym/sessions",
            get(list_gym_sessions_handler).post(create_gym_session_handler),
        )
        .route(
            "/gym/sessions/{id}",
            get(get_gym_session_handler)
                .patch(update_gym_session_handler)
                .delete(delete_gym_session_handler),
        )
        .route(
            "/exercises",
            get(list_exercises_handler).post(create_exercise_handler),
        )
        .route(
            "/exercises/{id}",
            get(get_exercise_handler)
                .patch(update_exercise_handler)
                .delete(delete_exercise_handler),
        )
}

/// Public pace calculator routes.
///
/// # Endpoints
///
/// - `POST /pace/distance`  - Distance from duration and pace
/// - `POST /pace/pace`      - Pace from distance and duration
/// - `POST /pace/time`      - Duration from distance and pace
/// - `POST /pace/aggregate` - Totals and average pace over segments
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/pace/distance", post(distance_handler))
        .route("/pace/pace", post(pace_handler))
        .route("/pace/time", post(time_handler))
        .route("/pace/aggregate", post(aggregate_handler))
}
