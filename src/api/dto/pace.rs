//! DTOs for the pace calculator endpoints.
//!
//! Every field is optional: a missing or invalid input produces a `null`
//! result rather than a validation error.

use serde::{Deserialize, Serialize};

use crate::utils::pace::Segment;

/// Request for `POST /api/pace/distance`.
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    /// Minutes.
    pub duration: Option<f64>,
    pub pace: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance: Option<f64>,
}

/// Request for `POST /api/pace/pace`.
#[derive(Debug, Deserialize)]
pub struct PaceRequest {
    pub distance: Option<f64>,
    /// Minutes.
    pub duration: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PaceResponse {
    pub pace: Option<String>,
}

/// Request for `POST /api/pace/time`.
#[derive(Debug, Deserialize)]
pub struct TimeRequest {
    pub distance: Option<f64>,
    pub pace: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimeResponse {
    /// Minutes.
    pub duration: Option<f64>,
}

/// Request for `POST /api/pace/aggregate`.
#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    #[serde(default)]
    pub segments: Vec<Segment>,
}
