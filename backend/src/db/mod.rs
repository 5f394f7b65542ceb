//! Storage layer for devices.
//!
//! Devices are persisted through the Repository pattern so the storage
//! backend can be swapped without touching the service or HTTP layers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers (http::handlers)                         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service layer (services::DeviceService)                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository trait (repository::DeviceRepository)        │
//! └─────────┬─────────────────────────────────┬─────────────┘
//!           │                                 │
//!   ┌───────▼────────┐              ┌─────────▼──────────┐
//!   │ LocalRepository│              │ KvRepository       │
//!   │ (in-memory)    │              │ (redb file)        │
//!   └────────────────┘              └────────────────────┘
//! ```
//!
//! - `repository`: trait definition and error types
//! - `repositories`: the backend implementations
//! - `factory`: backend selection from env, TOML or a builder
//! - `repo_config`: `repository.toml` parsing

#[cfg(not(any(feature = "local-repo", feature = "kv-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::{KvConfig, RepositoryConfig};
#[cfg(feature = "kv-repo")]
pub use repositories::KvRepository;
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::{DeviceRepository, ErrorContext, RepositoryError, RepositoryResult};
