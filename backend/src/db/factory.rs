//! Repository factory for dependency injection.
//!
//! The backend is chosen once at startup, from `REPOSITORY_TYPE`, a
//! `repository.toml` or an explicit [`RepositoryBuilder`], and handed to the
//! service layer as `Arc<dyn DeviceRepository>`.

use log::info;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::{KvConfig, RepositoryConfig};
#[cfg(feature = "kv-repo")]
use super::repositories::KvRepository;
#[cfg(feature = "local-repo")]
use super::repositories::LocalRepository;
use super::repository::{DeviceRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
    /// Durable key-value repository
    KeyValue,
}

impl FromStr for RepositoryType {
    type Err = RepositoryError;

    /// Parse repository type from string.
    ///
    /// Accepts `memory`/`local` and `kv`/`durable`/`redb`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "local" => Ok(Self::Local),
            "kv" | "durable" | "redb" => Ok(Self::KeyValue),
            _ => Err(RepositoryError::configuration(format!(
                "Unknown repository type: {}",
                s
            ))),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    ///
    /// Unset selects [`RepositoryType::Local`]; an unrecognised value is a
    /// configuration error.
    pub fn from_env() -> RepositoryResult<Self> {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(val) => val.parse(),
            Err(_) => Ok(Self::Local),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "memory",
            Self::KeyValue => "kv",
        }
    }
}

#[cfg(not(all(feature = "kv-repo", feature = "local-repo")))]
fn feature_disabled(repo_type: RepositoryType) -> RepositoryError {
    RepositoryError::configuration(format!(
        "{} repository feature not enabled",
        repo_type.as_str()
    ))
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```no_run
/// use device_api::db::{RepositoryFactory, RepositoryType};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let local = RepositoryFactory::create(RepositoryType::Local, None)?;
/// let from_env = RepositoryFactory::from_env()?;
/// # Ok(())
/// # }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `kv_config` is required for [`RepositoryType::KeyValue`] and ignored
    /// otherwise.
    pub fn create(
        repo_type: RepositoryType,
        kv_config: Option<&KvConfig>,
    ) -> RepositoryResult<Arc<dyn DeviceRepository>> {
        match repo_type {
            RepositoryType::KeyValue => {
                let config = kv_config.ok_or_else(|| {
                    RepositoryError::configuration("kv repository requires KvConfig")
                })?;
                Self::create_kv(config)
            }
            RepositoryType::Local => Self::create_local(),
        }
    }

    /// Create a durable key-value repository, opening its database file.
    pub fn create_kv(config: &KvConfig) -> RepositoryResult<Arc<dyn DeviceRepository>> {
        #[cfg(feature = "kv-repo")]
        {
            Ok(Arc::new(KvRepository::open(config)?))
        }
        #[cfg(not(feature = "kv-repo"))]
        {
            let _ = config;
            Err(feature_disabled(RepositoryType::KeyValue))
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> RepositoryResult<Arc<dyn DeviceRepository>> {
        #[cfg(feature = "local-repo")]
        {
            Ok(Arc::new(LocalRepository::new()))
        }
        #[cfg(not(feature = "local-repo"))]
        {
            Err(feature_disabled(RepositoryType::Local))
        }
    }

    /// Create repository from environment configuration.
    ///
    /// When `REPOSITORY_CONFIG` names a `repository.toml`, that file decides.
    /// Otherwise `REPOSITORY_TYPE` does, with `KV_PATH`/`KV_TABLE` supplying
    /// the durable connection settings.
    pub fn from_env() -> RepositoryResult<Arc<dyn DeviceRepository>> {
        if let Ok(path) = std::env::var("REPOSITORY_CONFIG") {
            return Self::from_config_file(path);
        }

        RepositoryBuilder::new().from_env()?.build()
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn DeviceRepository>> {
        RepositoryBuilder::new().from_config_file(config_path)?.build()
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```no_run
/// use device_api::db::{KvConfig, RepositoryBuilder, RepositoryType};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::KeyValue)
///     .kv_config(KvConfig { path: "devices.redb".into(), table: "devices".into() })
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    kv_config: Option<KvConfig>,
}

impl RepositoryBuilder {
    /// Create a new builder selecting the local repository.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::Local,
            kv_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the durable connection settings.
    pub fn kv_config(mut self, config: KvConfig) -> Self {
        self.kv_config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> RepositoryResult<Self> {
        self.repo_type = RepositoryType::from_env()?;

        if self.repo_type == RepositoryType::KeyValue {
            self.kv_config = Some(KvConfig::from_env()?);
        }

        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(self, config_path: P) -> RepositoryResult<Self> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.with_repository_config(&repo_config)
    }

    fn with_repository_config(mut self, repo_config: &RepositoryConfig) -> RepositoryResult<Self> {
        self.repo_type = repo_config.repository_type()?;

        if self.repo_type == RepositoryType::KeyValue {
            self.kv_config = repo_config.to_kv_config()?;
        }

        Ok(self)
    }

    /// Build the repository instance.
    pub fn build(self) -> RepositoryResult<Arc<dyn DeviceRepository>> {
        info!("Creating {} repository", self.repo_type.as_str());

        RepositoryFactory::create(self.repo_type, self.kv_config.as_ref())
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_aliases() {
        for s in ["memory", "local", "LOCAL", " Memory "] {
            assert_eq!(s.parse::<RepositoryType>().unwrap(), RepositoryType::Local);
        }
        for s in ["kv", "durable", "REDB"] {
            assert_eq!(s.parse::<RepositoryType>().unwrap(), RepositoryType::KeyValue);
        }
    }

    #[test]
    fn test_repository_type_invalid() {
        let err = "postgres".parse::<RepositoryType>().unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
        assert!(err.message().contains("Unknown repository type"));
    }

    #[cfg(feature = "local-repo")]
    #[test]
    fn test_builder_defaults_to_local() {
        let repo = RepositoryBuilder::new().build();
        assert!(repo.is_ok());
    }

    #[test]
    fn test_kv_without_config_fails() {
        let result = RepositoryFactory::create(RepositoryType::KeyValue, None);
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
