//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Running sessions, gym sessions and exercises
//! - [`repositories`] - Document store trait definitions
//! - [`identity`] - Authenticated user and identity provider abstraction
//!
//! The pace arithmetic the entities rely on lives in [`crate::utils::pace`].
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod identity;
pub mod repositories;
