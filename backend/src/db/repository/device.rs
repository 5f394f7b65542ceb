//! Device repository trait for CRUD operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::Device;

/// Repository trait for device storage.
///
/// Every operation touches exactly one device, addressed by its full id
/// (`/devices/<alphanumeric>`). Uniqueness on create is not enforced here:
/// `create_device` overwrites, and callers that need a conflict check must
/// look the id up first.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if the store is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Retrieve a device by id.
    ///
    /// # Returns
    /// * `Ok(Device)` - The stored device
    /// * `Err(RepositoryError::NotFound)` - If no device is stored under `id`
    /// * `Err(RepositoryError)` - If the operation fails
    async fn get_device(&self, id: &str) -> RepositoryResult<Device>;

    /// Store a device under `device.id`, replacing any existing record.
    ///
    /// # Returns
    /// * `Ok(Device)` - The stored device
    /// * `Err(RepositoryError)` - If the operation fails
    async fn create_device(&self, device: &Device) -> RepositoryResult<Device>;

    /// Replace the mutable fields of the device stored under `id`.
    ///
    /// The stored id always stays `id`, whatever `device.id` holds.
    ///
    /// # Returns
    /// * `Ok(Device)` - The device as stored after the update
    /// * `Err(RepositoryError::NotFound)` - If no device is stored under `id`
    /// * `Err(RepositoryError)` - If the operation fails
    async fn update_device(&self, id: &str, device: &Device) -> RepositoryResult<Device>;

    /// Remove the device stored under `id`.
    ///
    /// # Returns
    /// * `Ok(())` - The device was removed
    /// * `Err(RepositoryError::NotFound)` - If no device is stored under `id`
    /// * `Err(RepositoryError)` - If the operation fails
    async fn delete_device(&self, id: &str) -> RepositoryResult<()>;
}
