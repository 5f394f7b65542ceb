//! Data Transfer Objects for the HTTP API.
//!
//! Devices travel as [`crate::models::Device`] directly; only the health
//! endpoint has its own response type.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Repository status: `connected`, `disconnected` or `error: ...`
    pub repository: String,
}
