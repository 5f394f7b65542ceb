//! Key-value client capability used by [`super::KvRepository`].
//!
//! Items are flat attribute maps addressed by table name and partition key.
//! Implementations are blocking; the repository moves every call onto the
//! blocking thread pool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::db::repository::RepositoryError;

/// A single attribute value of a stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// String
    S(String),
    /// Number, kept in its textual form
    N(String),
    Bool(bool),
    Null,
}

impl AttributeValue {
    /// The string payload, if this is an `S` attribute.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

/// A stored item: attribute name to value.
pub type Item = BTreeMap<String, AttributeValue>;

#[derive(Error, Debug)]
pub enum KvError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<KvError> for RepositoryError {
    fn from(err: KvError) -> Self {
        match err {
            KvError::Storage(msg) => RepositoryError::storage(msg),
            KvError::Serialization(msg) => RepositoryError::serialization(msg),
        }
    }
}

/// Blocking key-value store capability.
///
/// Every method is atomic with respect to a single item.
pub trait KeyValueClient: Send + Sync {
    /// Create the table if it does not exist yet.
    fn ensure_table(&self, table: &str) -> Result<(), KvError>;

    /// Store `item` under `key`, replacing any previous item.
    fn put_item(&self, table: &str, key: &str, item: &Item) -> Result<(), KvError>;

    /// Fetch the item stored under `key`.
    fn get_item(&self, table: &str, key: &str) -> Result<Option<Item>, KvError>;

    /// Set the given attributes on an existing item.
    ///
    /// Returns the updated item, or `None` without writing anything when no
    /// item is stored under `key`.
    fn update_item(
        &self,
        table: &str,
        key: &str,
        attributes: &[(String, AttributeValue)],
    ) -> Result<Option<Item>, KvError>;

    /// Remove the item stored under `key`, returning it if it existed.
    fn delete_item(&self, table: &str, key: &str) -> Result<Option<Item>, KvError>;

    /// Check that the store is reachable.
    fn ping(&self) -> Result<(), KvError>;
}
