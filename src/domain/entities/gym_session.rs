//! Gym session entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single set of an exercise. `weight` is in kilograms, `rest_time` in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub reps: u32,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<u32>,
}

/// An exercise performed during a session, referencing the exercise catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub exercise_id: i64,
    pub sets: Vec<WorkoutSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutExercise {
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(|s| f64::from(s.reps) * s.weight).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GymSession {
    pub id: i64,
    pub user_uid: String,
    pub date: NaiveDate,
    pub exercises: Vec<WorkoutExercise>,
    pub duration: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GymSession {
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Total lifted volume: sum of reps times weight over every set.
    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }

    pub fn apply(&mut self, patch: GymSessionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(exercises) = patch.exercises {
            self.exercises = exercises;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGymSession {
    pub user_uid: String,
    pub date: NaiveDate,
    pub exercises: Vec<WorkoutExercise>,
    pub duration: Option<f64>,
    pub notes: Option<String>,
}

/// Partial update for a gym session; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GymSessionPatch {
    pub date: Option<NaiveDate>,
    pub exercises: Option<Vec<WorkoutExercise>>,
    pub duration: Option<Option<f64>>,
    pub notes: Option<Option<String>>,
}
