//! Device operations over any [`DeviceRepository`].
//!
//! The service is a thin delegation layer: it owns no state besides the
//! repository handle, and errors flow back to the caller unchanged.
//!
//! ```no_run
//! use std::sync::Arc;
//! use device_api::db::LocalRepository;
//! use device_api::services::DeviceService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = DeviceService::new(Arc::new(LocalRepository::new()));
//!     let missing = service.get("/devices/none").await;
//!     assert!(missing.unwrap_err().is_not_found());
//!     Ok(())
//! }
//! ```

use log::debug;
use std::sync::Arc;

use crate::db::repository::{DeviceRepository, RepositoryResult};
use crate::models::Device;

#[derive(Clone)]
pub struct DeviceService {
    repository: Arc<dyn DeviceRepository>,
}

impl DeviceService {
    pub fn new(repository: Arc<dyn DeviceRepository>) -> Self {
        Self { repository }
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> RepositoryResult<bool> {
        self.repository.health_check().await
    }

    pub async fn get(&self, id: &str) -> RepositoryResult<Device> {
        debug!("Fetching device {}", id);
        self.repository.get_device(id).await
    }

    /// Store a device, overwriting any record with the same id.
    pub async fn create(&self, device: &Device) -> RepositoryResult<Device> {
        debug!("Storing device {}", device.id);
        self.repository.create_device(device).await
    }

    /// Replace the mutable fields of the device stored under `id`.
    pub async fn update(&self, id: &str, device: &Device) -> RepositoryResult<Device> {
        debug!("Updating device {}", id);
        self.repository.update_device(id, device).await
    }

    pub async fn delete(&self, id: &str) -> RepositoryResult<()> {
        debug!("Deleting device {}", id);
        self.repository.delete_device(id).await
    }
}
