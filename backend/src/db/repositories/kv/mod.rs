//! Durable key-value repository implementation.
//!
//! [`KvRepository`] stores each device as one item keyed by its `id` in a
//! single table of a [`KeyValueClient`]. The shipped client is
//! [`RedbClient`], an embedded redb database file.

pub mod client;
pub mod redb_client;

use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::db::repo_config::KvConfig;
use crate::db::repository::{DeviceRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::Device;

pub use client::{AttributeValue, Item, KeyValueClient, KvError};
pub use redb_client::RedbClient;

/// Partition key attribute.
const KEY_ATTRIBUTE: &str = "id";

/// Durable repository delegating to a [`KeyValueClient`].
#[derive(Clone)]
pub struct KvRepository {
    client: Arc<dyn KeyValueClient>,
    table: String,
}

impl KvRepository {
    /// Wrap an existing client. The table must already exist.
    pub fn new(client: Arc<dyn KeyValueClient>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Open the redb database named by `config` and make sure its table exists.
    pub fn open(config: &KvConfig) -> RepositoryResult<Self> {
        let client = RedbClient::open(&config.path).map_err(|e| {
            RepositoryError::from(e)
                .with_context(ErrorContext::new("open").with_details(config.path.clone()))
        })?;
        client.ensure_table(&config.table)?;
        info!(
            "Opened kv repository at {} (table '{}')",
            config.path, config.table
        );

        Ok(Self::new(Arc::new(client), config.table.clone()))
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Run a blocking client call on the blocking thread pool.
    async fn call<T, F>(&self, operation: &'static str, id: &str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn KeyValueClient, &str) -> Result<T, KvError> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let table = self.table.clone();

        let result = tokio::task::spawn_blocking(move || f(client.as_ref(), &table))
            .await
            .map_err(|e| {
                RepositoryError::internal(format!("blocking task failed: {}", e))
                    .with_context(ErrorContext::device(operation, id))
            })?;

        result.map_err(|e| {
            warn!("{} failed for {}: {}", operation, id, e);
            RepositoryError::from(e).with_context(ErrorContext::device(operation, id))
        })
    }
}

fn device_to_item(device: &Device) -> Item {
    let mut item = Item::new();
    item.insert(KEY_ATTRIBUTE.to_string(), device.id.as_str().into());
    for (name, value) in mutable_attributes(device) {
        item.insert(name, value);
    }
    item
}

/// The attributes replaced on update, in their stored names.
fn mutable_attributes(device: &Device) -> Vec<(String, AttributeValue)> {
    vec![
        ("name".to_string(), device.name.as_str().into()),
        ("deviceModel".to_string(), device.device_model.as_str().into()),
        ("note".to_string(), device.note.as_str().into()),
        ("serial".to_string(), device.serial.as_str().into()),
    ]
}

fn item_to_device(item: &Item) -> RepositoryResult<Device> {
    let field = |name: &str| -> RepositoryResult<String> {
        item.get(name)
            .and_then(AttributeValue::as_s)
            .map(str::to_string)
            .ok_or_else(|| {
                RepositoryError::storage(format!("stored item has no string attribute '{}'", name))
            })
    };

    Ok(Device {
        id: field(KEY_ATTRIBUTE)?,
        device_model: field("deviceModel")?,
        name: field("name")?,
        note: field("note")?,
        serial: field("serial")?,
    })
}

#[async_trait]
impl DeviceRepository for KvRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let client = Arc::clone(&self.client);
        match tokio::task::spawn_blocking(move || client.ping()).await {
            Ok(Ok(())) => Ok(true),
            Ok(Err(e)) => {
                warn!("kv health check failed: {}", e);
                Ok(false)
            }
            Err(e) => Err(RepositoryError::internal(format!(
                "blocking task failed: {}",
                e
            ))),
        }
    }

    async fn get_device(&self, id: &str) -> RepositoryResult<Device> {
        let key = id.to_string();
        let item = self
            .call("get_device", id, move |client, table| {
                client.get_item(table, &key)
            })
            .await?;

        match item {
            Some(item) => item_to_device(&item).map_err(|e| e.with_operation("get_device")),
            None => {
                debug!("Device {} not found", id);
                Err(RepositoryError::device_not_found("get_device", id))
            }
        }
    }

    async fn create_device(&self, device: &Device) -> RepositoryResult<Device> {
        let key = device.id.clone();
        let item = device_to_item(device);
        self.call("create_device", &device.id, move |client, table| {
            client.put_item(table, &key, &item)
        })
        .await?;

        Ok(device.clone())
    }

    async fn update_device(&self, id: &str, device: &Device) -> RepositoryResult<Device> {
        let key = id.to_string();
        let attributes = mutable_attributes(device);
        let item = self
            .call("update_device", id, move |client, table| {
                client.update_item(table, &key, &attributes)
            })
            .await?;

        match item {
            Some(item) => item_to_device(&item).map_err(|e| e.with_operation("update_device")),
            None => Err(RepositoryError::device_not_found("update_device", id)),
        }
    }

    async fn delete_device(&self, id: &str) -> RepositoryResult<()> {
        let key = id.to_string();
        let removed = self
            .call("delete_device", id, move |client, table| {
                client.delete_item(table, &key)
            })
            .await?;

        match removed {
            Some(_) => Ok(()),
            None => Err(RepositoryError::device_not_found("delete_device", id)),
        }
    }
}
