//! In-memory local repository implementation.
//!
//! This module provides a local implementation of [`DeviceRepository`]
//! suitable for unit testing and local development. Devices live in a
//! `HashMap` keyed by id and are lost when the process exits.

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::repository::{DeviceRepository, RepositoryError, RepositoryResult};
use crate::models::Device;

/// In-memory local repository.
///
/// Each operation holds the lock for its whole read-modify-write sequence,
/// so concurrent requests never lose updates. Clones share the same store.
///
/// # Example
/// ```
/// use device_api::db::repositories::LocalRepository;
/// use device_api::db::repository::DeviceRepository;
/// use device_api::models::Device;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = LocalRepository::new();
/// let device = Device { id: "/devices/a1".into(), ..Default::default() };
/// repo.create_device(&device).await.unwrap();
/// assert_eq!(repo.get_device("/devices/a1").await.unwrap(), device);
/// # });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    devices: HashMap<String, Device>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            devices: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all devices from the repository.
    pub fn clear(&self) {
        self.data.write().devices.clear();
    }

    /// Get the number of devices stored.
    pub fn len(&self) -> usize {
        self.data.read().devices.len()
    }

    /// Whether the repository holds no devices.
    pub fn is_empty(&self) -> bool {
        self.data.read().devices.is_empty()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn get_device(&self, id: &str) -> RepositoryResult<Device> {
        self.data
            .read()
            .devices
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::device_not_found("get_device", id))
    }

    async fn create_device(&self, device: &Device) -> RepositoryResult<Device> {
        let mut data = self.data.write();
        if data.devices.insert(device.id.clone(), device.clone()).is_some() {
            debug!("Overwrote existing device {}", device.id);
        }
        Ok(device.clone())
    }

    async fn update_device(&self, id: &str, device: &Device) -> RepositoryResult<Device> {
        let mut data = self.data.write();
        let stored = data
            .devices
            .get_mut(id)
            .ok_or_else(|| RepositoryError::device_not_found("update_device", id))?;

        *stored = device.clone().with_id(id);
        Ok(stored.clone())
    }

    async fn delete_device(&self, id: &str) -> RepositoryResult<()> {
        self.data
            .write()
            .devices
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::device_not_found("delete_device", id))
    }
}
