//! [`KeyValueClient`] backed by an embedded redb database file.

use std::path::Path;
use std::sync::Arc;

use log::debug;
use redb::{Database, ReadableTable, TableDefinition, TableError};

use super::client::{AttributeValue, Item, KeyValueClient, KvError};

fn storage<E: std::fmt::Display>(e: E) -> KvError {
    KvError::Storage(e.to_string())
}

fn encode(item: &Item) -> Result<Vec<u8>, KvError> {
    serde_json::to_vec(item).map_err(|e| KvError::Serialization(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Item, KvError> {
    serde_json::from_slice(bytes).map_err(|e| KvError::Serialization(e.to_string()))
}

/// redb-backed client. Each logical table is a redb table of
/// `key -> JSON-encoded item`, and each call runs in its own transaction.
#[derive(Clone)]
pub struct RedbClient {
    db: Arc<Database>,
}

impl RedbClient {
    /// Open or create a database file at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KvError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(storage)?;
        debug!("Opened redb database at {}", path.display());

        Ok(Self { db: Arc::new(db) })
    }
}

impl KeyValueClient for RedbClient {
    fn ensure_table(&self, table: &str) -> Result<(), KvError> {
        let def = TableDefinition::<&str, &[u8]>::new(table);
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(def).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }

    fn put_item(&self, table: &str, key: &str, item: &Item) -> Result<(), KvError> {
        let def = TableDefinition::<&str, &[u8]>::new(table);
        let bytes = encode(item)?;
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(def).map_err(storage)?;
            table.insert(key, bytes.as_slice()).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }

    fn get_item(&self, table: &str, key: &str) -> Result<Option<Item>, KvError> {
        let def = TableDefinition::<&str, &[u8]>::new(table);
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = match read_txn.open_table(def) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(storage(e)),
        };

        let value = table.get(key).map_err(storage)?;
        match value {
            Some(guard) => decode(guard.value()).map(Some),
            None => Ok(None),
        }
    }

    fn update_item(
        &self,
        table: &str,
        key: &str,
        attributes: &[(String, AttributeValue)],
    ) -> Result<Option<Item>, KvError> {
        let def = TableDefinition::<&str, &[u8]>::new(table);
        let write_txn = self.db.begin_write().map_err(storage)?;
        let updated = {
            let mut table = write_txn.open_table(def).map_err(storage)?;
            let existing = table
                .get(key)
                .map_err(storage)?
                .map(|guard| guard.value().to_vec());

            match existing {
                Some(bytes) => {
                    let mut item = decode(&bytes)?;
                    for (name, value) in attributes {
                        item.insert(name.clone(), value.clone());
                    }
                    let bytes = encode(&item)?;
                    table.insert(key, bytes.as_slice()).map_err(storage)?;
                    Some(item)
                }
                None => None,
            }
        };

        if updated.is_some() {
            write_txn.commit().map_err(storage)?;
        } else {
            write_txn.abort().map_err(storage)?;
        }
        Ok(updated)
    }

    fn delete_item(&self, table: &str, key: &str) -> Result<Option<Item>, KvError> {
        let def = TableDefinition::<&str, &[u8]>::new(table);
        let write_txn = self.db.begin_write().map_err(storage)?;
        let removed = {
            let mut table = write_txn.open_table(def).map_err(storage)?;
            let removed = table
                .remove(key)
                .map_err(storage)?
                .map(|guard| guard.value().to_vec());
            removed
        };
        write_txn.commit().map_err(storage)?;

        removed.as_deref().map(decode).transpose()
    }

    fn ping(&self) -> Result<(), KvError> {
        self.db.begin_read().map(|_| ()).map_err(storage)
    }
}
