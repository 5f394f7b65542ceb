//! HTTP handlers for the REST API.
//!
//! Each handler decodes and validates its input, then delegates to the
//! [`DeviceService`](crate::services::DeviceService) held in [`AppState`].

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use super::dto::HealthResponse;
use super::error::AppError;
use super::state::AppState;
use crate::models::Device;
use crate::services::validate_device;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Decode a request body into a candidate device.
///
/// Anything that is not a single JSON object of string fields is rejected.
fn decode_device(body: &[u8]) -> Result<Device, AppError> {
    let de = &mut serde_json::Deserializer::from_slice(body);
    let device: Device = serde_path_to_error::deserialize(&mut *de)
        .map_err(|e| AppError::BadRequest(format!("malformed request body: {}", e)))?;
    de.end()
        .map_err(|e| AppError::BadRequest(format!("malformed request body: {}", e)))?;
    Ok(device)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let repository = match state.devices.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e.message()),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        repository,
    })
}

// =============================================================================
// Device CRUD
// =============================================================================

/// POST /api/devices
///
/// Create a device. Rejects an id that is already stored with 409.
pub async fn create_device(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Device>), AppError> {
    let device = validate_device(decode_device(&body)?)?;

    // Not atomic with the write below; concurrent creators of one id race.
    match state.devices.get(&device.id).await {
        Ok(_) => {
            warn!("Rejected duplicate device {}", device.id);
            return Err(AppError::Conflict(format!(
                "device '{}' already exists",
                device.id
            )));
        }
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let stored = state.devices.create(&device).await?;
    info!("Created device {}", stored.id);
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/devices/{id}
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Device> {
    let id = Device::id_from_path_segment(&id);
    let device = state.devices.get(&id).await?;
    Ok(Json(device))
}

/// PUT /api/devices/{id}
///
/// Replace the mutable fields of a device. Any `id` in the body is ignored.
pub async fn update_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> HandlerResult<Device> {
    let id = Device::id_from_path_segment(&id);
    let device = validate_device(decode_device(&body)?.with_id(id.as_str()))?;

    let updated = state.devices.update(&id, &device).await?;
    info!("Updated device {}", updated.id);
    Ok(Json(updated))
}

/// DELETE /api/devices/{id}
pub async fn delete_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = Device::id_from_path_segment(&id);
    state.devices.delete(&id).await?;
    info!("Deleted device {}", id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_device() {
        let device = decode_device(br#"{"id":"/devices/a1","name":"x"}"#).unwrap();
        assert_eq!(device.id, "/devices/a1");
        assert_eq!(device.serial, "");
    }

    #[test]
    fn test_decode_rejects_malformed_bodies() {
        for body in [&b""[..], b"{", br#""device""#, br#"{"name": 5}"#, b"{} {}"] {
            let err = decode_device(body).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "body {:?}", body);
        }
    }

    #[test]
    fn test_decode_error_names_the_field() {
        match decode_device(br#"{"serial": true}"#) {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("serial"), "{}", msg),
            other => panic!("unexpected {:?}", other),
        }
    }
}
