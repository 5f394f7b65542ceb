//! Tests for the DeviceService delegation layer.

mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use device_api::db::RepositoryError;
use device_api::services::DeviceService;
use support::FailingRepository;

#[tokio::test]
async fn test_errors_pass_through_unchanged() {
    let repo = Arc::new(FailingRepository::default());
    let service = DeviceService::new(repo.clone());
    let device = support::sample_device("x1");

    let err = service.get(&device.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::StorageError { .. }));
    assert_eq!(err.message(), "connection reset");
    assert_eq!(err.context().operation.as_deref(), Some("get_device"));

    let err = service.update(&device.id, &device).await.unwrap_err();
    assert_eq!(err.context().operation.as_deref(), Some("update_device"));

    assert!(service.create(&device).await.is_err());
    assert!(service.delete(&device.id).await.is_err());
    assert!(service.health_check().await.is_err());
    assert_eq!(repo.calls.load(Ordering::SeqCst), 5);
}

#[cfg(feature = "local-repo")]
#[tokio::test]
async fn test_service_round_trip_on_local_repository() {
    use device_api::db::LocalRepository;

    let repo = Arc::new(LocalRepository::new());
    let service = DeviceService::new(repo.clone());
    let device = support::sample_device("svc1");

    assert_eq!(service.create(&device).await.unwrap(), device);
    assert_eq!(service.get(&device.id).await.unwrap(), device);

    let clone = service.clone();
    clone.delete(&device.id).await.unwrap();
    assert!(service.get(&device.id).await.unwrap_err().is_not_found());
    assert!(repo.is_empty());
    assert!(service.health_check().await.unwrap());
}
