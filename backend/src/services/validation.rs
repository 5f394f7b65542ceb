//! Device validation.
//!
//! [`validate_device`] sanitizes the free-text fields of a candidate device
//! and then checks every field rule independently, so a single call reports
//! all problems at once instead of stopping at the first one.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::sanitize::sanitize_text;
use crate::models::Device;

static DEVICE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/devices/[A-Za-z0-9]+$").expect("valid device id regex"));

static DEVICE_MODEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/devicemodels/[A-Za-z0-9]+$").expect("valid device model regex")
});

static ALPHANUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid alphanumeric regex"));

/// A single broken field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    /// `id` is not `/devices/<alphanumeric>`
    InvalidId,
    /// `name` is empty
    MissingName,
    /// `deviceModel` is empty
    MissingDeviceModel,
    /// `deviceModel` is not `/devicemodels/<alphanumeric>`
    InvalidDeviceModel,
    /// `serial` is not alphanumeric after sanitization
    InvalidSerial,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidId => "invalid id format: expected '/devices/<alphanumeric>'",
            Self::MissingName => "name is required",
            Self::MissingDeviceModel => "deviceModel is required",
            Self::InvalidDeviceModel => {
                "invalid deviceModel format: expected '/devicemodels/<alphanumeric>'"
            }
            Self::InvalidSerial => "invalid serial format: expected alphanumeric characters only",
        };
        f.write_str(msg)
    }
}

/// Aggregated validation failure.
///
/// Displays as every violation message joined with `"; "`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Violations in rule order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether a given rule was broken.
    pub fn contains(&self, violation: FieldViolation) -> bool {
        self.violations.contains(&violation)
    }
}

/// Sanitize and validate a candidate device.
///
/// `name`, `note` and `serial` are sanitized first; `id` and `deviceModel`
/// are checked verbatim. Returns the sanitized device when every rule holds.
///
/// ```
/// use device_api::models::Device;
/// use device_api::services::validation::validate_device;
///
/// let device = Device {
///     id: "/devices/abc123".into(),
///     device_model: "/devicemodels/Model2".into(),
///     name: "  device 1 ".into(),
///     note: "n".into(),
///     serial: "ABC123".into(),
/// };
/// let clean = validate_device(device).unwrap();
/// assert_eq!(clean.name, "Device 1");
/// ```
pub fn validate_device(device: Device) -> Result<Device, ValidationError> {
    let device = Device {
        name: sanitize_text(&device.name),
        note: sanitize_text(&device.note),
        serial: sanitize_text(&device.serial),
        ..device
    };

    let mut violations = Vec::new();

    if !DEVICE_ID_RE.is_match(&device.id) {
        violations.push(FieldViolation::InvalidId);
    }

    if device.name.is_empty() {
        violations.push(FieldViolation::MissingName);
    }

    if device.device_model.is_empty() {
        violations.push(FieldViolation::MissingDeviceModel);
    }

    if !DEVICE_MODEL_RE.is_match(&device.device_model) {
        violations.push(FieldViolation::InvalidDeviceModel);
    }

    if !ALPHANUMERIC_RE.is_match(&device.serial) {
        violations.push(FieldViolation::InvalidSerial);
    }

    if violations.is_empty() {
        Ok(device)
    } else {
        Err(ValidationError { violations })
    }
}
