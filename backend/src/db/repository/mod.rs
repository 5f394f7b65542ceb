//! Repository trait definitions for device storage.
//!
//! - [`error`]: Error types for repository operations
//! - [`device`]: CRUD operations for devices
//!
//! Backends live in [`crate::db::repositories`]; the HTTP layer only ever
//! sees an `Arc<dyn DeviceRepository>`.

pub mod device;
pub mod error;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use device::DeviceRepository;
