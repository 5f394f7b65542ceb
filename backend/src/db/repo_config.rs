//! Repository configuration file support.
//!
//! Reads backend selection and connection settings from a `repository.toml`:
//!
//! ```toml
//! [repository]
//! type = "kv"
//!
//! [kv]
//! path = "data/devices.redb"
//! table = "devices"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::factory::RepositoryType;
use super::repository::{RepositoryError, RepositoryResult};

/// Connection settings for the durable backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvConfig {
    /// Database file path
    pub path: String,
    /// Table holding the devices
    pub table: String,
}

impl KvConfig {
    /// Read `KV_PATH` and `KV_TABLE` from the environment. Both are required.
    pub fn from_env() -> RepositoryResult<Self> {
        let path = required_env("KV_PATH")?;
        let table = required_env("KV_TABLE")?;
        Ok(Self { path, table })
    }
}

fn required_env(name: &str) -> RepositoryResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(RepositoryError::configuration(format!(
            "{} must be set for the kv repository",
            name
        ))),
    }
}

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub kv: KvSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Durable key-value settings. Both fields are required when `type = "kv"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KvSettings {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub table: String,
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> RepositoryResult<RepositoryType> {
        self.repository.repo_type.parse()
    }

    /// Durable connection settings, when this selects the kv backend.
    pub fn to_kv_config(&self) -> RepositoryResult<Option<KvConfig>> {
        if self.repository_type()? != RepositoryType::KeyValue {
            return Ok(None);
        }

        if self.kv.path.trim().is_empty() || self.kv.table.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "kv repository requires 'kv.path' and 'kv.table' settings",
            ));
        }

        Ok(Some(KvConfig {
            path: self.kv.path.clone(),
            table: self.kv.table.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_config() {
        let toml = r#"
[repository]
type = "memory"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository.repo_type, "memory");
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    }

    #[test]
    fn test_unknown_type_is_configuration_error() {
        let config: RepositoryConfig = toml::from_str("[repository]\ntype = \"cassandra\"\n").unwrap();
        assert!(matches!(
            config.repository_type(),
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_parse_kv_config() {
        let toml = r#"
[repository]
type = "kv"

[kv]
path = "data/devices.redb"
table = "devices"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::KeyValue);

        let kv = config.to_kv_config().unwrap().unwrap();
        assert_eq!(kv.path, "data/devices.redb");
        assert_eq!(kv.table, "devices");
    }

    #[test]
    fn test_kv_requires_table() {
        let toml = r#"
[repository]
type = "redb"

[kv]
path = "data/devices.redb"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert!(config.to_kv_config().is_err());
    }
}
