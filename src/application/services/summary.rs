//! Aggregated view over a user's running sessions.

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::entities::RunningSession;
use crate::utils::pace::parse_pace;

/// Number of sessions reported as "recent".
pub const RECENT_SESSIONS: usize = 5;

/// Totals and highlights over a list of running sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningSummary {
    /// Up to [`RECENT_SESSIONS`] sessions, in the order they were given.
    pub recent: Vec<RunningSession>,
    pub total_sessions: usize,
    pub week_sessions: usize,
    pub total_distance: f64,
    pub week_distance: f64,
    pub best_pace: Option<String>,
}

impl RunningSummary {
    /// Builds the summary from sessions ordered newest first.
    pub fn from_sessions(sessions: &[RunningSession], today: NaiveDate) -> Self {
        let week = week_sessions(sessions, today);

        Self {
            recent: recent_sessions(sessions).to_vec(),
            total_sessions: sessions.len(),
            week_sessions: week.len(),
            total_distance: total_distance(sessions.iter()),
            week_distance: total_distance(week.into_iter()),
            best_pace: best_pace(sessions),
        }
    }
}

pub fn recent_sessions(sessions: &[RunningSession]) -> &[RunningSession] {
    &sessions[..sessions.len().min(RECENT_SESSIONS)]
}

/// First day of the week containing `today`. Weeks start on Sunday.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let offset = u64::from(today.weekday().num_days_from_sunday());
    today.checked_sub_days(Days::new(offset)).unwrap_or(today)
}

/// Sessions dated on or after the start of the current week.
pub fn week_sessions(sessions: &[RunningSession], today: NaiveDate) -> Vec<&RunningSession> {
    let start = week_start(today);
    sessions.iter().filter(|s| s.date >= start).collect()
}

/// Sum of session distances; sessions without a distance count as zero.
pub fn total_distance<'a>(sessions: impl Iterator<Item = &'a RunningSession>) -> f64 {
    let total: f64 = sessions.filter_map(|s| s.distance).sum();
    (total * 100.0).round() / 100.0
}

/// Fastest average pace among the sessions, as originally written.
///
/// Paces that do not parse are ignored. On ties the earlier session wins.
pub fn best_pace(sessions: &[RunningSession]) -> Option<String> {
    sessions
        .iter()
        .filter_map(|s| {
            let pace = s.average_pace.as_deref()?;
            parse_pace(pace).map(|seconds| (seconds, pace))
        })
        .reduce(|best, current| if current.0 < best.0 { current } else { best })
        .map(|(_, pace)| pace.to_string())
}
