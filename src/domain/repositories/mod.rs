//! Repository trait definitions for the domain layer.
//!
//! These traits describe the document store the service runs on: create,
//! list-by-owner (newest first, optional limit), get, partial update and
//! delete. Concrete implementations live in `crate::infrastructure`.
//!
//! # Available Repositories
//!
//! - [`RunningSessionRepository`] - Running session documents
//! - [`GymSessionRepository`] - Gym session documents
//! - [`ExerciseRepository`] - Exercise catalog
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! Mock implementations are generated with `mockall` under `cfg(test)`.

pub mod exercise_repository;
pub mod gym_session_repository;
pub mod running_session_repository;
pub mod token_repository;

pub use exercise_repository::ExerciseRepository;
pub use gym_session_repository::GymSessionRepository;
pub use running_session_repository::RunningSessionRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
#[cfg(test)]
pub use gym_session_repository::MockGymSessionRepository;
#[cfg(test)]
pub use running_session_repository::MockRunningSessionRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
