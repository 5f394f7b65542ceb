//! # Device API
//!
//! A JSON REST service managing a single resource type, the device.
//!
//! Incoming devices are sanitized and validated, then persisted through a
//! pluggable repository: an in-memory map for development and tests, or a
//! durable key-value store backed by an embedded redb file.
//!
//! ## Architecture
//!
//! - [`models`]: the `Device` resource
//! - [`services`]: sanitization, validation and the device service
//! - [`db`]: repository trait, backends and backend selection
//! - [`config`]: process configuration from the environment
//! - `http`: axum router, handlers and error mapping (feature `http-server`)

// RepositoryError carries an ErrorContext for diagnostics.
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
