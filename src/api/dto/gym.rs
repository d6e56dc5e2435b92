//! DTOs for gym session endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::{GymSession, GymSessionPatch, NewGymSession, WorkoutExercise};

/// Request body for `POST /api/gym/sessions`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGymSessionRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
    pub duration: Option<f64>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl From<CreateGymSessionRequest> for NewGymSession {
    fn from(req: CreateGymSessionRequest) -> Self {
        NewGymSession {
            user_uid: String::new(),
            date: req.date,
            exercises: req.exercises,
            duration: req.duration,
            notes: req.notes,
        }
    }
}

/// Request body for `PATCH /api/gym/sessions/{id}`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGymSessionRequest {
    pub date: Option<NaiveDate>,
    pub exercises: Option<Vec<WorkoutExercise>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub duration: Option<Option<f64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

impl From<UpdateGymSessionRequest> for GymSessionPatch {
    fn from(req: UpdateGymSessionRequest) -> Self {
        GymSessionPatch {
            date: req.date,
            exercises: req.exercises,
            duration: req.duration,
            notes: req.notes,
        }
    }
}

/// JSON representation of a gym session, with derived totals.
#[derive(Debug, Serialize)]
pub struct GymSessionResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub exercises: Vec<WorkoutExercise>,
    pub duration: Option<f64>,
    pub notes: Option<String>,
    pub total_sets: usize,
    pub total_volume: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GymSession> for GymSessionResponse {
    fn from(session: GymSession) -> Self {
        Self {
            total_sets: session.total_sets(),
            total_volume: session.total_volume(),
            id: session.id,
            date: session.date,
            exercises: session.exercises,
            duration: session.duration,
            notes: session.notes,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}
