//! Repository implementations module.
//!
//! This module contains the implementations of the `DeviceRepository` trait:
//! - `local`: In-memory implementation for unit testing and local development
//! - `kv`: Durable key-value implementation backed by an embedded redb file
#[cfg(feature = "kv-repo")]
pub mod kv;
#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "kv-repo")]
pub use kv::{KvRepository, RedbClient};
#[cfg(feature = "local-repo")]
pub use local::LocalRepository;
