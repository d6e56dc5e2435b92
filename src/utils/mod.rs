//! Utility functions shared across layers.
//!
//! - [`pace`] - Pace, distance and time conversions and segment aggregation
//! - [`token`] - API token generation

pub mod pace;
pub mod token;
