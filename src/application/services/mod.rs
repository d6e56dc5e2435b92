//! Business logic services for the application layer.

pub mod auth_service;
pub mod exercise_service;
pub mod gym_service;
pub mod running_service;
pub mod summary;

pub use auth_service::AuthService;
pub use exercise_service::ExerciseService;
pub use gym_service::GymService;
pub use running_service::RunningService;
pub use summary::RunningSummary;
