//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are plain prepared statements mapped through `FromRow` row types; nested
//! documents (segments, intervals, workout sets) live in JSONB columns.
//!
//! # Repositories
//!
//! - [`PgRunningSessionRepository`] - Running session documents
//! - [`PgGymSessionRepository`] - Gym session documents
//! - [`PgExerciseRepository`] - Exercise catalog
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_exercise_repository;
pub mod pg_gym_session_repository;
pub mod pg_running_session_repository;
pub mod pg_token_repository;

pub use pg_exercise_repository::PgExerciseRepository;
pub use pg_gym_session_repository::PgGymSessionRepository;
pub use pg_running_session_repository::PgRunningSessionRepository;
pub use pg_token_repository::PgTokenRepository;
