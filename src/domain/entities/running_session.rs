//! Running session entity and its derived metrics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::pace::{
    Segment, aggregate, distance_from_time_and_pace, pace_from_distance_and_time, parse_pace,
    time_from_distance_and_pace,
};

/// Kind of run being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    EasyRun,
    Intervals,
    Tempo,
    LongRun,
    Race,
}

impl RunType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunType::EasyRun => "easy_run",
            RunType::Intervals => "intervals",
            RunType::Tempo => "tempo",
            RunType::LongRun => "long_run",
            RunType::Race => "race",
        }
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy_run" => Ok(RunType::EasyRun),
            "intervals" => Ok(RunType::Intervals),
            "tempo" => Ok(RunType::Tempo),
            "long_run" => Ok(RunType::LongRun),
            "race" => Ok(RunType::Race),
            other => Err(format!("unknown run type '{other}'")),
        }
    }
}

/// Interval workout description, e.g. 6 x 800m in 3:10 with 1:30 rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSet {
    pub distance: f64,
    pub time: String,
    pub rest_time: String,
    pub repetitions: u32,
}

/// Official race result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub name: String,
    pub distance: f64,
    pub official_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<u32>,
}

/// A logged run owned by a single user.
///
/// `distance` is in kilometers, `duration` in minutes and `average_pace` in
/// `M:SS` per kilometer.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningSession {
    pub id: i64,
    pub user_uid: String,
    pub date: NaiveDate,
    pub run_type: RunType,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub average_pace: Option<String>,
    pub intervals: Option<IntervalSet>,
    pub race: Option<RaceResult>,
    pub segments: Vec<Segment>,
    pub notes: Option<String>,
    pub perceived_effort: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RunningSession {
    /// Applies a partial update in place. `updated_at` is left to the store.
    pub fn apply(&mut self, patch: RunningSessionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(run_type) = patch.run_type {
            self.run_type = run_type;
        }
        if let Some(distance) = patch.distance {
            self.distance = distance;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(average_pace) = patch.average_pace {
            self.average_pace = average_pace;
        }
        if let Some(intervals) = patch.intervals {
            self.intervals = intervals;
        }
        if let Some(race) = patch.race {
            self.race = race;
        }
        if let Some(segments) = patch.segments {
            self.segments = segments;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(perceived_effort) = patch.perceived_effort {
            self.perceived_effort = perceived_effort;
        }
    }
}

/// Input data for logging a new run.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRunningSession {
    pub user_uid: String,
    pub date: NaiveDate,
    pub run_type: RunType,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub average_pace: Option<String>,
    pub intervals: Option<IntervalSet>,
    pub race: Option<RaceResult>,
    pub segments: Vec<Segment>,
    pub notes: Option<String>,
    pub perceived_effort: Option<i16>,
}

impl NewRunningSession {
    /// Fills in whatever of distance, duration and average pace can be derived.
    ///
    /// Segment totals are used first for any missing metric; afterwards a
    /// single missing member of (distance, duration, pace) is computed from the
    /// other two. Values supplied by the caller are never overwritten, and a
    /// derived value that rounds to zero is dropped.
    pub fn with_derived_metrics(mut self) -> Self {
        if !self.segments.is_empty() {
            let totals = aggregate(&self.segments);
            if self.distance.is_none() {
                self.distance = positive(Some(totals.total_distance));
            }
            if self.duration.is_none() {
                self.duration = positive(Some(totals.total_time));
            }
            if self.average_pace.is_none() {
                self.average_pace = nonzero_pace(totals.average_pace);
            }
        }

        match (self.distance, self.duration, self.average_pace.as_deref()) {
            (None, Some(duration), Some(pace)) => {
                self.distance = positive(distance_from_time_and_pace(duration, pace));
            }
            (Some(distance), None, Some(pace)) => {
                self.duration = positive(time_from_distance_and_pace(distance, pace));
            }
            (Some(distance), Some(duration), None) => {
                self.average_pace = nonzero_pace(pace_from_distance_and_time(distance, duration));
            }
            _ => {}
        }

        self
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Drops paces that format as `0:00`, which no stored session may carry.
fn nonzero_pace(pace: Option<String>) -> Option<String> {
    pace.filter(|p| parse_pace(p).is_some_and(|s| s > 0))
}

/// Partial update for a running session.
///
/// Outer `None` leaves a field unchanged; for optional fields `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningSessionPatch {
    pub date: Option<NaiveDate>,
    pub run_type: Option<RunType>,
    pub distance: Option<Option<f64>>,
    pub duration: Option<Option<f64>>,
    pub average_pace: Option<Option<String>>,
    pub intervals: Option<Option<IntervalSet>>,
    pub race: Option<Option<RaceResult>>,
    pub segments: Option<Vec<Segment>>,
    pub notes: Option<Option<String>>,
    pub perceived_effort: Option<Option<i16>>,
}
