//! Application layer services implementing business logic.
//!
//! Services consume repository traits and validate input; they are stateless
//! and take the caller's identity on every call. [`RunningStore`] layers a
//! client-style cached view with loading and error tracking on top of
//! [`services::RunningService`].
//!
//! # Available Services
//!
//! - [`services::running_service::RunningService`] - Running session logging
//! - [`services::gym_service::GymService`] - Gym session logging
//! - [`services::exercise_service::ExerciseService`] - Exercise catalog
//! - [`services::auth_service::AuthService`] - API token authentication
//! - [`services::summary::RunningSummary`] - Running totals and highlights

pub mod running_store;
pub mod services;

pub use running_store::RunningStore;
