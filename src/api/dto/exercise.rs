//! DTOs for exercise catalog endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Exercise, ExerciseCategory, ExercisePatch, NewExercise};

fn default_custom() -> bool {
    true
}

/// Request body for `POST /api/exercises`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExerciseRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category: ExerciseCategory,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default = "default_custom")]
    pub is_custom: bool,
}

impl From<CreateExerciseRequest> for NewExercise {
    fn from(req: CreateExerciseRequest) -> Self {
        NewExercise {
            user_uid: String::new(),
            name: req.name,
            category: req.category,
            muscle_groups: req.muscle_groups,
            is_custom: req.is_custom,
        }
    }
}

/// Request body for `PATCH /api/exercises/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExerciseRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub category: Option<ExerciseCategory>,
    pub muscle_groups: Option<Vec<String>>,
}

impl From<UpdateExerciseRequest> for ExercisePatch {
    fn from(req: UpdateExerciseRequest) -> Self {
        ExercisePatch {
            name: req.name,
            category: req.category,
            muscle_groups: req.muscle_groups,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub id: i64,
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle_groups: Vec<String>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Exercise> for ExerciseResponse {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            category: exercise.category,
            muscle_groups: exercise.muscle_groups,
            is_custom: exercise.is_custom,
            created_at: exercise.created_at,
            updated_at: exercise.updated_at,
        }
    }
}
