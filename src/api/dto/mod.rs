//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod exercise;
pub mod gym;
pub mod health;
pub mod pace;
pub mod query;
pub mod running;
