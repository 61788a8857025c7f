//! Core ledger storage
//!
//! The ledger is an ordered list of caller-supplied transaction records,
//! newest first, persisted as a single pretty-printed JSON array. Every
//! mutation reads the whole file, snapshots it to a backup file, applies
//! one change, and writes the whole list back.

pub mod error;
pub mod store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorSeverity};
pub use ledgerweb_config::ReadPolicy;
pub use store::LedgerStore;

/// A single transaction record
///
/// Records are opaque JSON objects. Only the `id` field is ever inspected,
/// and only when it holds a string; every other field is carried through
/// untouched and in its original order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction(Map<String, Value>);

impl Transaction {
    /// The record's `id`, if present and a string
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Look up any field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether this record would be removed by a delete of `id`
    pub fn matches_id(&self, id: &str) -> bool {
        self.id() == Some(id)
    }
}

impl TryFrom<Value> for Transaction {
    type Error = Value;

    /// Only JSON objects are transactions; anything else is handed back
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

/// Outcome of store initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// The ledger file was already present and left as is
    Existing,
    /// An empty ledger file was created
    Created,
}

/// Operations every ledger backend provides
///
/// Each call returns the complete ledger as it stands after the call,
/// newest record first.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Create an empty ledger if none exists yet
    async fn initialize(&self) -> CoreResult<InitStatus>;

    /// Read the whole ledger
    async fn list(&self) -> CoreResult<Vec<Transaction>>;

    /// Insert `record` at the front of the ledger
    async fn append(&self, record: Transaction) -> CoreResult<Vec<Transaction>>;

    /// Remove every record whose string `id` equals `id`
    async fn delete(&self, id: &str) -> CoreResult<Vec<Transaction>>;

    /// Read the whole ledger for export; same content as [`list`](Self::list)
    async fn export(&self) -> CoreResult<Vec<Transaction>> {
        self.list().await
    }
}

// ==================== Tests ====================
