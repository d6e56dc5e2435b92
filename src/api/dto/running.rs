//! DTOs for running session endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::RunningSummary;
use crate::domain::entities::{
    IntervalSet, NewRunningSession, RaceResult, RunType, RunningSession, RunningSessionPatch,
};
use crate::utils::pace::Segment;

/// `M:SS`-shaped pace text. Range checks happen in the service.
pub(crate) static PACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\d+$").unwrap());

/// Request body for `POST /api/running/sessions`.
///
/// Any one of `distance`, `duration` and `average_pace` may be omitted and is
/// derived from the other two (or from `segments`).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRunningSessionRequest {
    pub date: NaiveDate,
    pub run_type: RunType,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    #[validate(regex(path = "*PACE_REGEX", message = "Pace must be in M:SS format"))]
    pub average_pace: Option<String>,
    pub intervals: Option<IntervalSet>,
    pub race: Option<RaceResult>,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub perceived_effort: Option<i16>,
}

impl From<CreateRunningSessionRequest> for NewRunningSession {
    fn from(req: CreateRunningSessionRequest) -> Self {
        NewRunningSession {
            user_uid: String::new(),
            date: req.date,
            run_type: req.run_type,
            distance: req.distance,
            duration: req.duration,
            average_pace: req.average_pace,
            intervals: req.intervals,
            race: req.race,
            segments: req.segments,
            notes: req.notes,
            perceived_effort: req.perceived_effort,
        }
    }
}

/// Request body for `PATCH /api/running/sessions/{id}`.
///
/// Absent fields are left unchanged; `null` clears an optional field.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRunningSessionRequest {
    pub date: Option<NaiveDate>,
    pub run_type: Option<RunType>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub distance: Option<Option<f64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub duration: Option<Option<f64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub average_pace: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub intervals: Option<Option<IntervalSet>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub race: Option<Option<RaceResult>>,
    pub segments: Option<Vec<Segment>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub perceived_effort: Option<Option<i16>>,
}

impl From<UpdateRunningSessionRequest> for RunningSessionPatch {
    fn from(req: UpdateRunningSessionRequest) -> Self {
        RunningSessionPatch {
            date: req.date,
            run_type: req.run_type,
            distance: req.distance,
            duration: req.duration,
            average_pace: req.average_pace,
            intervals: req.intervals,
            race: req.race,
            segments: req.segments,
            notes: req.notes,
            perceived_effort: req.perceived_effort,
        }
    }
}

/// JSON representation of a running session.
#[derive(Debug, Serialize)]
pub struct RunningSessionResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub run_type: RunType,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub average_pace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervals: Option<IntervalSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race: Option<RaceResult>,
    pub segments: Vec<Segment>,
    pub notes: Option<String>,
    pub perceived_effort: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RunningSession> for RunningSessionResponse {
    fn from(session: RunningSession) -> Self {
        Self {
            id: session.id,
            date: session.date,
            run_type: session.run_type,
            distance: session.distance,
            duration: session.duration,
            average_pace: session.average_pace,
            intervals: session.intervals,
            race: session.race,
            segments: session.segments,
            notes: session.notes,
            perceived_effort: session.perceived_effort,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// Response for `GET /api/running/summary`.
#[derive(Debug, Serialize)]
pub struct RunningSummaryResponse {
    pub recent: Vec<RunningSessionResponse>,
    pub total_sessions: usize,
    pub week_sessions: usize,
    pub total_distance: f64,
    pub week_distance: f64,
    pub best_pace: Option<String>,
}

impl From<RunningSummary> for RunningSummaryResponse {
    fn from(summary: RunningSummary) -> Self {
        Self {
            recent: summary.recent.into_iter().map(Into::into).collect(),
            total_sessions: summary.total_sessions,
            week_sessions: summary.week_sessions,
            total_distance: summary.total_distance,
            week_distance: summary.week_distance,
            best_pace: summary.best_pace,
        }
    }
}
