//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::DeviceRepository;
use crate::services::DeviceService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Device operations over the configured repository
    pub devices: DeviceService,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn DeviceRepository>) -> Self {
        Self {
            devices: DeviceService::new(repository),
        }
    }
}
