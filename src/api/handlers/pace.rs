//! Handlers for the public pace calculator.
//!
//! Inputs that cannot produce a result yield `null` fields with `200 OK`.

use axum::Json;

use crate::api::dto::pace::{
    AggregateRequest, DistanceRequest, DistanceResponse, PaceRequest, PaceResponse, TimeRequest,
    TimeResponse,
};
use crate::utils::pace::{
    SegmentTotals, aggregate, distance_from_time_and_pace, pace_from_distance_and_time,
    time_from_distance_and_pace,
};

/// `POST /api/pace/distance`
///
/// ```json
/// { "duration": 30, "pace": "5:00" }  →  { "distance": 6.0 }
/// ```
pub async fn distance_handler(Json(req): Json<DistanceRequest>) -> Json<DistanceResponse> {
    let distance = match (req.duration, req.pace.as_deref()) {
        (Some(duration), Some(pace)) => distance_from_time_and_pace(duration, pace),
        _ => None,
    };

    Json(DistanceResponse { distance })
}

/// `POST /api/pace/pace`
///
/// ```json
/// { "distance": 10, "duration": 50 }  →  { "pace": "5:00" }
/// ```
pub async fn pace_handler(Json(req): Json<PaceRequest>) -> Json<PaceResponse> {
    let pace = match (req.distance, req.duration) {
        (Some(distance), Some(duration)) => pace_from_distance_and_time(distance, duration),
        _ => None,
    };

    Json(PaceResponse { pace })
}

/// `POST /api/pace/time`
pub async fn time_handler(Json(req): Json<TimeRequest>) -> Json<TimeResponse> {
    let duration = match (req.distance, req.pace.as_deref()) {
        (Some(distance), Some(pace)) => time_from_distance_and_pace(distance, pace),
        _ => None,
    };

    Json(TimeResponse { duration })
}

/// `POST /api/pace/aggregate`
///
/// Returns total distance, total time and average pace over the segments.
pub async fn aggregate_handler(Json(req): Json<AggregateRequest>) -> Json<SegmentTotals> {
    Json(aggregate(&req.segments))
}
