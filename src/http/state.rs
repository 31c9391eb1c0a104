//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::RoutineRepository;
use crate::service::RoutineService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance, used directly by the health check.
    pub repository: Arc<dyn RoutineRepository>,
    /// Routine generation service.
    pub service: Arc<RoutineService>,
}

impl AppState {
    /// Create application state over the given repository.
    pub fn new(repository: Arc<dyn RoutineRepository>) -> Self {
        let service = Arc::new(RoutineService::new(repository.clone()));
        Self {
            repository,
            service,
        }
    }
}
