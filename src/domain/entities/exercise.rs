//! Exercise catalog entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Bodyweight,
}

impl ExerciseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "strength",
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::Bodyweight => "bodyweight",
        }
    }
}

impl FromStr for ExerciseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(ExerciseCategory::Strength),
            "cardio" => Ok(ExerciseCategory::Cardio),
            "bodyweight" => Ok(ExerciseCategory::Bodyweight),
            other => Err(format!("unknown exercise category '{other}'")),
        }
    }
}

/// An exercise that gym sessions refer to by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub user_uid: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle_groups: Vec<String>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    pub fn apply(&mut self, patch: ExercisePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(muscle_groups) = patch.muscle_groups {
            self.muscle_groups = muscle_groups;
        }
    }
}

/// Input data for adding an exercise to a user's catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub user_uid: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle_groups: Vec<String>,
    pub is_custom: bool,
}

/// Partial update for an exercise. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub category: Option<ExerciseCategory>,
    pub muscle_groups: Option<Vec<String>>,
}
