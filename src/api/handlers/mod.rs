//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod exercises;
pub mod gym;
pub mod health;
pub mod pace;
pub mod running;

pub use exercises::{
    create_exercise_handler, delete_exercise_handler, get_exercise_handler,
    list_exercises_handler, update_exercise_handler,
};
pub use gym::{
    create_gym_session_handler, delete_gym_session_handler, get_gym_session_handler,
    list_gym_sessions_handler, update_gym_session_handler,
};
pub use health::health_handler;
pub use pace::{aggregate_handler, distance_handler, pace_handler, time_handler};
pub use running::{
    create_running_session_handler, delete_running_session_handler, get_running_session_handler,
    list_running_sessions_handler, running_summary_handler, update_running_session_handler,
};
