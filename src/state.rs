//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, ExerciseService, GymService, RunningService};
use crate::domain::repositories::{
    ExerciseRepository, GymSessionRepository, RunningSessionRepository, TokenRepository,
};
use crate::infrastructure::memory::InMemoryStore;

/// Which storage backend the services run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub running_service: Arc<RunningService>,
    pub gym_service: Arc<GymService>,
    pub exercise_service: Arc<ExerciseService>,
    pub auth_service: Arc<AuthService>,
    pub storage_backend: StorageBackend,
}

impl AppState {
    /// Wires the services over one set of repositories.
    pub fn new(
        running: Arc<dyn RunningSessionRepository>,
        gym: Arc<dyn GymSessionRepository>,
        exercises: Arc<dyn ExerciseRepository>,
        tokens: Arc<dyn TokenRepository>,
        signing_secret: String,
        storage_backend: StorageBackend,
    ) -> Self {
        Self {
            running_service: Arc::new(RunningService::new(running)),
            gym_service: Arc::new(GymService::new(gym, exercises.clone())),
            exercise_service: Arc::new(ExerciseService::new(exercises)),
            auth_service: Arc::new(AuthService::new(tokens, signing_secret)),
            storage_backend,
        }
    }

    /// Builds the state over a single in-memory store shared by all services.
    pub fn in_memory(store: Arc<InMemoryStore>, signing_secret: String) -> Self {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            signing_secret,
            StorageBackend::Memory,
        )
    }
}
