//! Pace, distance and time conversions for running workouts.
//!
//! A pace is written as `M:SS` (minutes unpadded, seconds zero-padded) and
//! means "time needed to cover one distance unit". All functions are pure and
//! return `None` when a result cannot be represented: missing, zero, negative
//! or malformed inputs never produce `0`, `NaN` or a panic.
//!
//! # Examples
//!
//! ```
//! use fitness_tracker::utils::pace::{
//!     distance_from_time_and_pace, pace_from_distance_and_time, parse_pace,
//! };
//!
//! assert_eq!(parse_pace("5:00"), Some(300));
//! assert_eq!(distance_from_time_and_pace(30.0, "5:00"), Some(6.0));
//! assert_eq!(pace_from_distance_and_time(10.0, 50.0).as_deref(), Some("5:00"));
//! ```

use serde::{Deserialize, Serialize};

/// One contiguous portion of a workout.
///
/// `duration` is in minutes. At most one of `distance` and `pace` is needed,
/// the other one is derived from it and the duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<String>,
}

impl Segment {
    pub fn with_distance(duration: f64, distance: f64) -> Self {
        Self {
            duration,
            distance: Some(distance),
            pace: None,
        }
    }

    pub fn with_pace(duration: f64, pace: impl Into<String>) -> Self {
        Self {
            duration,
            distance: None,
            pace: Some(pace.into()),
        }
    }

    /// Resolves the distance covered by this segment.
    ///
    /// An explicit positive distance wins; otherwise it is derived from
    /// duration and pace. Returns `None` when neither is usable.
    pub fn resolved_distance(&self) -> Option<f64> {
        match self.distance {
            Some(distance) if distance > 0.0 => Some(distance),
            _ => match self.pace.as_deref() {
                Some(pace) => distance_from_time_and_pace(self.duration, pace),
                None => None,
            },
        }
    }

    fn has_duration(&self) -> bool {
        self.duration > 0.0
    }
}

/// Totals computed over an ordered list of segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTotals {
    pub total_distance: f64,
    pub total_time: f64,
    pub average_pace: Option<String>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts `M:SS` text into seconds per distance unit.
///
/// The seconds component is not limited to `0..60`: `"4:75"` is 315 seconds.
/// Returns `None` for empty input, a missing colon, or a component that is not
/// a non-negative integer. Minutes are unbounded up to what fits a `u64` in
/// seconds.
pub fn parse_pace(pace: &str) -> Option<u64> {
    let (minutes, seconds) = pace.trim().split_once(':')?;
    let minutes: u64 = minutes.trim().parse().ok()?;
    let seconds: u64 = seconds.trim().parse().ok()?;

    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Formats seconds per distance unit as `M:SS`.
///
/// The sub-minute remainder is rounded on its own and never carried into the
/// minutes, so `119.6` formats as `"1:60"`.
pub fn format_pace(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let remaining_seconds = (seconds % 60.0).round() as u64;

    Some(format!("{minutes}:{remaining_seconds:02}"))
}

fn pace_seconds(pace: &str) -> Option<f64> {
    parse_pace(pace).filter(|&s| s > 0).map(|s| s as f64)
}

/// Distance covered in `duration_minutes` at `pace`, rounded to 2 decimals.
pub fn distance_from_time_and_pace(duration_minutes: f64, pace: &str) -> Option<f64> {
    if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
        return None;
    }
    let pace_seconds = pace_seconds(pace)?;

    Some(round2(duration_minutes * 60.0 / pace_seconds))
}

/// Average pace needed to cover `distance` in `duration_minutes`.
pub fn pace_from_distance_and_time(distance: f64, duration_minutes: f64) -> Option<String> {
    if !distance.is_finite() || distance <= 0.0 {
        return None;
    }
    if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
        return None;
    }

    format_pace(duration_minutes * 60.0 / distance)
}

/// Minutes needed to cover `distance` at `pace`, rounded to 2 decimals.
pub fn time_from_distance_and_pace(distance: f64, pace: &str) -> Option<f64> {
    if !distance.is_finite() || distance <= 0.0 {
        return None;
    }
    let pace_seconds = pace_seconds(pace)?;

    Some(round2(distance * pace_seconds / 60.0))
}

/// Average pace over all segments whose distance can be resolved.
///
/// Segments without a positive duration or without a resolvable distance are
/// left out of both the distance and the time accumulator.
pub fn aggregate_average_pace(segments: &[Segment]) -> Option<String> {
    let mut total_distance = 0.0;
    let mut total_time = 0.0;

    for segment in segments.iter().filter(|s| s.has_duration()) {
        if let Some(distance) = segment.resolved_distance() {
            total_distance += distance;
            total_time += segment.duration;
        }
    }

    if total_distance <= 0.0 || total_time <= 0.0 {
        return None;
    }

    pace_from_distance_and_time(total_distance, total_time)
}

/// Sum of resolvable segment distances, rounded to 2 decimals.
pub fn aggregate_total_distance(segments: &[Segment]) -> f64 {
    let total: f64 = segments.iter().filter_map(Segment::resolved_distance).sum();
    round2(total)
}

/// Sum of all segment durations in minutes.
///
/// Unlike [`aggregate_total_distance`], every segment is included; a missing or
/// invalid duration counts as zero.
pub fn aggregate_total_time(segments: &[Segment]) -> f64 {
    segments
        .iter()
        .map(|s| if s.has_duration() { s.duration } else { 0.0 })
        .sum()
}

/// Computes total distance, total time and average pace in one call.
pub fn aggregate(segments: &[Segment]) -> SegmentTotals {
    SegmentTotals {
        total_distance: aggregate_total_distance(segments),
        total_time: aggregate_total_time(segments),
        average_pace: aggregate_average_pace(segments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_segments() -> Vec<Segment> {
        vec![Segment::with_pace(30.0, "5:00"), Segment::with_distance(20.0, 5.0)]
    }

    #[test]
    fn test_parse_pace_valid() {
        assert_eq!(parse_pace("5:00"), Some(300));
        assert_eq!(parse_pace("4:33"), Some(273));
        assert_eq!(parse_pace("0:45"), Some(45));
        assert_eq!(parse_pace("12:05"), Some(725));
        assert_eq!(parse_pace("0:00"), Some(0));
    }

    #[test]
    fn test_parse_pace_does_not_limit_seconds() {
        assert_eq!(parse_pace("4:75"), Some(315));
    }

    #[test]
    fn test_parse_pace_accepts_very_large_minutes() {
        assert_eq!(parse_pace("100000000:00"), Some(6_000_000_000));
        assert_eq!(parse_pace("71582789:00"), Some(4_294_967_340));
        assert_eq!(parse_pace("18446744073709551615:00"), None);
    }

    #[test]
    fn test_parse_pace_all_minutes_and_seconds() {
        for minutes in 0..20u64 {
            for seconds in 0..60u64 {
                let text = format!("{minutes}:{seconds:02}");
                assert_eq!(parse_pace(&text), Some(minutes * 60 + seconds), "{text}");
            }
        }
    }

    #[test]
    fn test_parse_pace_rejects_malformed_input() {
        assert_eq!(parse_pace(""), None);
        assert_eq!(parse_pace("500"), None);
        assert_eq!(parse_pace("abc"), None);
        assert_eq!(parse_pace("a:30"), None);
        assert_eq!(parse_pace("5:xx"), None);
        assert_eq!(parse_pace(":30"), None);
        assert_eq!(parse_pace("5:"), None);
        assert_eq!(parse_pace("-1:30"), None);
        assert_eq!(parse_pace("5:00:10"), None);
        assert_eq!(parse_pace("5.5:00"), None);
    }

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(300.0).as_deref(), Some("5:00"));
        assert_eq!(format_pace(273.0).as_deref(), Some("4:33"));
        assert_eq!(format_pace(45.0).as_deref(), Some("0:45"));
        assert_eq!(format_pace(65.4).as_deref(), Some("1:05"));
        assert_eq!(format_pace(725.0).as_deref(), Some("12:05"));
        assert_eq!(format_pace(6005.0).as_deref(), Some("100:05"));
    }

    #[test]
    fn test_format_pace_no_value_for_non_positive() {
        assert_eq!(format_pace(0.0), None);
        assert_eq!(format_pace(-1.0), None);
        assert_eq!(format_pace(-300.0), None);
        assert_eq!(format_pace(f64::NAN), None);
        assert_eq!(format_pace(f64::INFINITY), None);
    }

    #[test]
    fn test_format_pace_does_not_carry_rounded_minute() {
        assert_eq!(format_pace(119.6).as_deref(), Some("1:60"));
    }

    #[test]
    fn test_parse_format_round_trip() {
        for minutes in 0..15u64 {
            for seconds in 0..60u64 {
                let total = minutes * 60 + seconds;
                if total == 0 {
                    continue;
                }
                let text = format_pace(total as f64).unwrap();
                assert_eq!(parse_pace(&text), Some(total), "{text}");
            }
        }
    }

    #[test]
    fn test_distance_from_time_and_pace() {
        assert_eq!(distance_from_time_and_pace(30.0, "5:00"), Some(6.0));
        assert_eq!(distance_from_time_and_pace(50.0, "4:33"), Some(10.99));
    }

    #[test]
    fn test_distance_from_time_and_pace_no_value() {
        assert_eq!(distance_from_time_and_pace(0.0, "5:00"), None);
        assert_eq!(distance_from_time_and_pace(-1.0, "5:00"), None);
        assert_eq!(distance_from_time_and_pace(30.0, ""), None);
        assert_eq!(distance_from_time_and_pace(30.0, "fast"), None);
        assert_eq!(distance_from_time_and_pace(30.0, "0:00"), None);
    }

    #[test]
    fn test_pace_from_distance_and_time() {
        assert_eq!(pace_from_distance_and_time(10.0, 50.0).as_deref(), Some("5:00"));
        assert_eq!(pace_from_distance_and_time(11.0, 50.0).as_deref(), Some("4:33"));
        assert_eq!(pace_from_distance_and_time(0.0, 50.0), None);
        assert_eq!(pace_from_distance_and_time(10.0, 0.0), None);
        assert_eq!(pace_from_distance_and_time(-10.0, 50.0), None);
        assert_eq!(pace_from_distance_and_time(10.0, -50.0), None);
    }

    #[test]
    fn test_time_from_distance_and_pace() {
        assert_eq!(time_from_distance_and_pace(10.0, "5:00"), Some(50.0));
        assert_eq!(time_from_distance_and_pace(21.1, "4:30"), Some(94.95));
        assert_eq!(time_from_distance_and_pace(0.0, "5:00"), None);
        assert_eq!(time_from_distance_and_pace(-3.0, "5:00"), None);
        assert_eq!(time_from_distance_and_pace(10.0, "5-00"), None);
    }

    #[test]
    fn test_aggregate_total_distance() {
        assert_eq!(aggregate_total_distance(&mixed_segments()), 11.0);
        assert_eq!(aggregate_total_distance(&[]), 0.0);
    }

    #[test]
    fn test_aggregate_total_time() {
        let segments = vec![
            Segment {
                duration: 30.0,
                ..Default::default()
            },
            Segment {
                duration: 20.0,
                ..Default::default()
            },
        ];
        assert_eq!(aggregate_total_time(&segments), 50.0);
        assert_eq!(aggregate_total_time(&[]), 0.0);
    }

    #[test]
    fn test_aggregate_average_pace() {
        let expected = pace_from_distance_and_time(11.0, 50.0);
        assert_eq!(aggregate_average_pace(&mixed_segments()), expected);
        assert_eq!(aggregate_average_pace(&mixed_segments()).as_deref(), Some("4:33"));
        assert_eq!(aggregate_average_pace(&[]), None);
    }

    #[test]
    fn test_unresolvable_segment_only_counts_toward_time() {
        let mut segments = mixed_segments();
        segments.push(Segment {
            duration: 10.0,
            ..Default::default()
        });

        assert_eq!(aggregate_total_distance(&segments), 11.0);
        assert_eq!(aggregate_total_time(&segments), 60.0);
        assert_eq!(aggregate_average_pace(&segments).as_deref(), Some("4:33"));
    }

    #[test]
    fn test_segment_without_duration_skipped_for_average() {
        let segments = vec![
            Segment::with_distance(0.0, 3.0),
            Segment::with_distance(50.0, 10.0),
        ];

        assert_eq!(aggregate_average_pace(&segments).as_deref(), Some("5:00"));
        assert_eq!(aggregate_total_distance(&segments), 13.0);
    }

    #[test]
    fn test_explicit_distance_wins_over_pace() {
        let segment = Segment {
            duration: 30.0,
            distance: Some(7.5),
            pace: Some("5:00".to_string()),
        };
        assert_eq!(segment.resolved_distance(), Some(7.5));
    }

    #[test]
    fn test_zero_distance_falls_back_to_pace() {
        let segment = Segment {
            duration: 30.0,
            distance: Some(0.0),
            pace: Some("5:00".to_string()),
        };
        assert_eq!(segment.resolved_distance(), Some(6.0));
    }

    #[test]
    fn test_all_unresolvable_segments() {
        let segments = vec![
            Segment::with_pace(30.0, "bad"),
            Segment {
                duration: 15.0,
                ..Default::default()
            },
        ];

        assert_eq!(aggregate_average_pace(&segments), None);
        assert_eq!(aggregate_total_distance(&segments), 0.0);
        assert_eq!(aggregate_total_time(&segments), 45.0);
    }

    #[test]
    fn test_aggregate_bundles_all_totals() {
        let totals = aggregate(&mixed_segments());
        assert_eq!(totals.total_distance, 11.0);
        assert_eq!(totals.total_time, 50.0);
        assert_eq!(totals.average_pace.as_deref(), Some("4:33"));
    }

    #[test]
    fn test_segment_deserializes_with_optional_fields() {
        let segment: Segment = serde_json::from_str(r#"{"duration": 30, "pace": "5:00"}"#).unwrap();
        assert_eq!(segment, Segment::with_pace(30.0, "5:00"));

        let segment: Segment = serde_json::from_str(r#"{"distance": 4.2}"#).unwrap();
        assert_eq!(segment.duration, 0.0);
        assert_eq!(segment.distance, Some(4.2));
    }
}
