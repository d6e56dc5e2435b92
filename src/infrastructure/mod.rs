//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - In-process storage used without a database
//! - [`persistence`] - PostgreSQL repository implementations

pub mod memory;
pub mod persistence;
