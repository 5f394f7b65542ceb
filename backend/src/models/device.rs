//! Device resource model.
//!
//! `Device` is the only entity managed by the API. Its JSON shape is
//! `{id, deviceModel, name, note, serial}`; every field is a string.

use serde::{Deserialize, Serialize};

/// Prefix that turns a bare path segment into a full device id.
pub const DEVICE_ID_PREFIX: &str = "/devices/";

/// A managed device.
///
/// Fields missing from an incoming JSON body decode to empty strings so that
/// validation, rather than decoding, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    /// Full identifier, e.g. `/devices/abc123`
    pub id: String,
    /// Model reference, e.g. `/devicemodels/Model2`
    pub device_model: String,
    /// Display name
    pub name: String,
    /// Free-text note
    pub note: String,
    /// Serial number (alphanumeric)
    pub serial: String,
}

impl Device {
    /// Build the full device id from the `{id}` segment of a request path.
    ///
    /// ```
    /// use device_api::models::Device;
    ///
    /// assert_eq!(Device::id_from_path_segment("abc123"), "/devices/abc123");
    /// ```
    pub fn id_from_path_segment(segment: &str) -> String {
        format!("{}{}", DEVICE_ID_PREFIX, segment)
    }

    /// Return a copy of this device addressed by `id`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let device = Device {
            id: "/devices/abc123".to_string(),
            device_model: "/devicemodels/Model2".to_string(),
            name: "Device 1".to_string(),
            note: "n".to_string(),
            serial: "ABC123".to_string(),
        };

        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value["id"], "/devices/abc123");
        assert_eq!(value["deviceModel"], "/devicemodels/Model2");
        assert_eq!(value["name"], "Device 1");
        assert_eq!(value["note"], "n");
        assert_eq!(value["serial"], "ABC123");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let device: Device = serde_json::from_str(r#"{"id": "bad id", "serial": "!!"}"#).unwrap();
        assert_eq!(device.id, "bad id");
        assert_eq!(device.serial, "!!");
        assert!(device.name.is_empty());
        assert!(device.device_model.is_empty());
        assert!(device.note.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let device: Device =
            serde_json::from_str(r#"{"name": "x", "firmware": "1.0.2"}"#).unwrap();
        assert_eq!(device.name, "x");
    }

    #[test]
    fn test_with_id_overrides_body_id() {
        let device = Device {
            id: "/devices/other".to_string(),
            ..Default::default()
        }
        .with_id(Device::id_from_path_segment("abc123"));
        assert_eq!(device.id, "/devices/abc123");
    }
}
