//! Integration tests for the durable KvRepository over redb.
#![cfg(feature = "kv-repo")]

mod support;

use std::sync::Arc;

use device_api::db::repositories::kv::{AttributeValue, Item, KeyValueClient, RedbClient};
use device_api::db::{DeviceRepository, KvConfig, KvRepository, RepositoryError};
use tempfile::TempDir;

fn config(dir: &TempDir) -> KvConfig {
    KvConfig {
        path: dir.path().join("devices.redb").to_str().unwrap().to_string(),
        table: "devices".to_string(),
    }
}

#[tokio::test]
async fn test_kv_repository_contract() {
    let dir = TempDir::new().unwrap();
    let repo = KvRepository::open(&config(&dir)).unwrap();
    assert_eq!(repo.table(), "devices");
    support::assert_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_devices_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let device = support::sample_device("durable1");

    {
        let repo = KvRepository::open(&config(&dir)).unwrap();
        repo.create_device(&device).await.unwrap();
    }

    let repo = KvRepository::open(&config(&dir)).unwrap();
    assert_eq!(repo.get_device(&device.id).await.unwrap(), device);
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_items_are_stored_by_attribute() {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(RedbClient::open(dir.path().join("kv.redb")).unwrap());
    client.ensure_table("devices").unwrap();
    let repo = KvRepository::new(client.clone(), "devices");

    let device = support::sample_device("attr1");
    repo.create_device(&device).await.unwrap();

    let item = client.get_item("devices", &device.id).unwrap().unwrap();
    assert_eq!(item["id"], AttributeValue::S(device.id.clone()));
    assert_eq!(item["deviceModel"], AttributeValue::S(device.device_model.clone()));
    assert_eq!(item["serial"], AttributeValue::S(device.serial.clone()));
}

#[tokio::test]
async fn test_corrupt_item_is_storage_error() {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(RedbClient::open(dir.path().join("kv.redb")).unwrap());
    client.ensure_table("devices").unwrap();

    let mut item = Item::new();
    item.insert("id".to_string(), AttributeValue::from("/devices/bad"));
    item.insert("name".to_string(), AttributeValue::Bool(true));
    client.put_item("devices", "/devices/bad", &item).unwrap();

    let repo = KvRepository::new(client, "devices");
    let err = repo.get_device("/devices/bad").await.unwrap_err();
    assert!(matches!(err, RepositoryError::StorageError { .. }));
    assert_eq!(err.context().operation.as_deref(), Some("get_device"));
}

#[test]
fn test_open_unwritable_path_fails() {
    let dir = TempDir::new().unwrap();
    let config = KvConfig {
        path: dir.path().join("missing").join("devices.redb").to_str().unwrap().to_string(),
        table: "devices".to_string(),
    };

    let err = KvRepository::open(&config).err().unwrap();
    assert!(matches!(err, RepositoryError::StorageError { .. }));
}
