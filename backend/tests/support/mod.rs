#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use device_api::db::{DeviceRepository, RepositoryError, RepositoryResult};
use device_api::models::Device;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable that backend selection reads.
pub const REPOSITORY_VARS: [&str; 4] = ["REPOSITORY_TYPE", "REPOSITORY_CONFIG", "KV_PATH", "KV_TABLE"];

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on unwind, and access to the process-global
/// environment is serialized across tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // A failed assertion in another test must not cascade.
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Like [`with_scoped_env`], with every backend selection variable cleared
/// before `changes` apply.
pub fn with_repository_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut all: Vec<(&str, Option<&str>)> = REPOSITORY_VARS.iter().map(|k| (*k, None)).collect();
    all.extend_from_slice(changes);
    with_scoped_env(&all, f)
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// A device that passes validation unchanged.
pub fn sample_device(segment: &str) -> Device {
    Device {
        id: Device::id_from_path_segment(segment),
        device_model: "/devicemodels/Model2".to_string(),
        name: "Device 1".to_string(),
        note: "Lab Bench".to_string(),
        serial: "Abc123".to_string(),
    }
}

/// Behaviour every `DeviceRepository` backend must share.
///
/// Expects an empty repository.
pub async fn assert_repository_contract(repo: &dyn DeviceRepository) {
    let device = sample_device("contract1");

    assert!(repo.get_device(&device.id).await.unwrap_err().is_not_found());
    assert!(repo
        .update_device(&device.id, &device)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(repo.delete_device(&device.id).await.unwrap_err().is_not_found());

    assert_eq!(repo.create_device(&device).await.unwrap(), device);
    assert_eq!(repo.get_device(&device.id).await.unwrap(), device);

    // Create overwrites; uniqueness is enforced above the repository.
    let renamed = Device {
        name: "Renamed".to_string(),
        ..device.clone()
    };
    repo.create_device(&renamed).await.unwrap();
    assert_eq!(repo.get_device(&device.id).await.unwrap().name, "Renamed");

    // Update replaces every mutable field and keeps the addressing id.
    let replacement = Device {
        id: "/devices/elsewhere".to_string(),
        device_model: "/devicemodels/Model9".to_string(),
        name: "Replaced".to_string(),
        note: String::new(),
        serial: "Zz9".to_string(),
    };
    let updated = repo.update_device(&device.id, &replacement).await.unwrap();
    assert_eq!(updated, replacement.clone().with_id(device.id.as_str()));
    assert_eq!(repo.get_device(&device.id).await.unwrap(), updated);
    assert!(repo
        .get_device("/devices/elsewhere")
        .await
        .unwrap_err()
        .is_not_found());

    repo.delete_device(&device.id).await.unwrap();
    assert!(repo.get_device(&device.id).await.unwrap_err().is_not_found());
    assert!(repo.delete_device(&device.id).await.unwrap_err().is_not_found());
}

/// Repository whose every call fails with a storage error.
#[derive(Default)]
pub struct FailingRepository {
    pub calls: AtomicUsize,
}

impl FailingRepository {
    fn fail<T>(&self, operation: &str) -> RepositoryResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::storage("connection reset").with_operation(operation))
    }
}

#[async_trait]
impl DeviceRepository for FailingRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.fail("health_check")
    }

    async fn get_device(&self, _id: &str) -> RepositoryResult<Device> {
        self.fail("get_device")
    }

    async fn create_device(&self, _device: &Device) -> RepositoryResult<Device> {
        self.fail("create_device")
    }

    async fn update_device(&self, _id: &str, _device: &Device) -> RepositoryResult<Device> {
        self.fail("update_device")
    }

    async fn delete_device(&self, _id: &str) -> RepositoryResult<()> {
        self.fail("delete_device")
    }
}
