//! Core domain entities representing the fitness log data model.
//!
//! Every persisted document is owned by one user (`user_uid`) and carries
//! `created_at`/`updated_at` timestamps assigned by the store.
//!
//! # Entity Types
//!
//! - [`RunningSession`] - A logged run with optional pace segments
//! - [`GymSession`] - A strength workout made of exercises and sets
//! - [`Exercise`] - An entry of a user's exercise catalog
//!
//! # Design Pattern
//!
//! Separate structs are used for each lifecycle step:
//! - `NewRunningSession`, `NewGymSession`, `NewExercise` - For creating new documents
//! - `RunningSessionPatch`, `GymSessionPatch`, `ExercisePatch` - For partial updates

pub mod exercise;
pub mod gym_session;
pub mod running_session;

pub use exercise::{Exercise, ExerciseCategory, ExercisePatch, NewExercise};
pub use gym_session::{GymSession, GymSessionPatch, NewGymSession, WorkoutExercise, WorkoutSet};
pub use running_session::{
    IntervalSet, NewRunningSession, RaceResult, RunType, RunningSession, RunningSessionPatch,
};
