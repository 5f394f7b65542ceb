//! Service layer between the HTTP handlers and the repository.
//!
//! - `sanitize`: free-text normalization
//! - `validation`: device field rules
//! - `device_service`: repository delegation shared by all handlers

pub mod device_service;
pub mod sanitize;
pub mod validation;

pub use device_service::DeviceService;
pub use sanitize::sanitize_text;
pub use validation::{validate_device, FieldViolation, ValidationError};
