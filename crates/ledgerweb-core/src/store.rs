//! File-backed ledger store

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::{InitStatus, Transaction, TransactionStore};
use async_trait::async_trait;
use ledgerweb_config::{backup_path_for, Config, ReadPolicy};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

/// Ledger persisted as one JSON array on disk
///
/// Mutations hold `write_lock` for the whole read-modify-write cycle, so two
/// concurrent appends through the same store never overwrite each other.
/// Reads take no lock, so a list racing a write can see a truncated file and
/// fall under the read policy.
pub struct LedgerStore {
    path: PathBuf,
    backup_path: PathBuf,
    read_policy: ReadPolicy,
    write_lock: Mutex<()>,
    logger: DefaultErrorLogger,
}

impl LedgerStore {
    /// Store at `path` with a `.backup` sibling and lenient reads
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = backup_path_for(&path, DEFAULT_BACKUP_SUFFIX);
        Self {
            path,
            backup_path,
            read_policy: ReadPolicy::default(),
            write_lock: Mutex::new(()),
            logger: DefaultErrorLogger,
        }
    }

    /// Store described by the `data` and `ledger` config sections
    pub fn from_config(config: &Config) -> Self {
        Self {
            path: config.ledger_path(),
            backup_path: config.backup_path(),
            read_policy: config.ledger.read_policy,
            write_lock: Mutex::new(()),
            logger: DefaultErrorLogger,
        }
    }

    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }

    pub fn ledger_path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    /// Raw file bytes; a missing file reads as `None`
    async fn read_raw(&self) -> CoreResult<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::io(&self.path, e)),
        }
    }

    /// Apply the read policy to a failed load
    fn recover(&self, loaded: CoreResult<Vec<Transaction>>, operation: &str) -> CoreResult<Vec<Transaction>> {
        match loaded {
            Err(e) if self.read_policy == ReadPolicy::Lenient && e.is_read_recoverable() => {
                let context = ErrorContext::new(operation)
                    .with_data("path", serde_json::json!(self.path.to_string_lossy()));
                self.logger.log_warning(
                    &format!("{}; continuing with an empty ledger", e),
                    &context,
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Overwrite the backup with the pre-mutation content
    async fn snapshot(&self, raw: &[u8]) -> CoreResult<()> {
        fs::write(&self.backup_path, raw)
            .await
            .map_err(|e| CoreError::io(&self.backup_path, e))
    }

    /// Overwrite the ledger with `transactions`, 2-space indented
    async fn persist(&self, transactions: &[Transaction]) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(transactions)?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| CoreError::io(&self.path, e))
    }

    /// Locked read, snapshot, `apply`, write cycle shared by all mutations
    ///
    /// Content that was read is always snapshotted before anything else
    /// happens. A file that cannot be read at all fails the mutation under
    /// either policy, since nothing could be backed up before overwriting it.
    async fn mutate<F>(&self, operation: &str, apply: F) -> CoreResult<Vec<Transaction>>
    where
        F: FnOnce(&mut Vec<Transaction>) + Send,
    {
        let _guard = self.write_lock.lock().await;

        let loaded = match self.read_raw().await? {
            Some(raw) if !is_blank(&raw) => {
                self.snapshot(&raw).await?;
                parse_ledger(&raw, &self.path)
            }
            _ => Ok(Vec::new()),
        };

        let mut transactions = self.recover(loaded, operation)?;
        apply(&mut transactions);
        self.persist(&transactions).await?;

        log::debug!(
            "{}: ledger {} now holds {} transactions",
            operation,
            self.path.display(),
            transactions.len()
        );
        Ok(transactions)
    }
}

fn is_blank(raw: &[u8]) -> bool {
    String::from_utf8_lossy(raw).trim().is_empty()
}

/// Parse ledger file bytes; blank content is an empty ledger
///
/// Invalid UTF-8 is decoded lossily, so a stray byte inside one string field
/// does not cost the rest of the ledger.
pub fn parse_ledger(raw: &[u8], path: &Path) -> CoreResult<Vec<Transaction>> {
    let text = String::from_utf8_lossy(raw);
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text).map_err(|e| CoreError::corrupt(path, e))
}

#[async_trait]
impl TransactionStore for LedgerStore {
    async fn initialize(&self) -> CoreResult<InitStatus> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| CoreError::io(parent, e))?;
            }
        }

        let created = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;

        match created {
            Ok(_) => {
                fs::write(&self.path, "[]")
                    .await
                    .map_err(|e| CoreError::io(&self.path, e))?;
                log::info!("Created {}", self.path.display());
                Ok(InitStatus::Created)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                log::info!("{} exists", self.path.display());
                Ok(InitStatus::Existing)
            }
            Err(e) => Err(CoreError::io(&self.path, e)),
        }
    }

    async fn list(&self) -> CoreResult<Vec<Transaction>> {
        let loaded = match self.read_raw().await {
            Ok(Some(raw)) => parse_ledger(&raw, &self.path),
            Ok(None) => Ok(Vec::new()),
            Err(e) => Err(e),
        };
        self.recover(loaded, "list")
    }

    async fn append(&self, record: Transaction) -> CoreResult<Vec<Transaction>> {
        self.mutate("append", move |transactions| transactions.insert(0, record))
            .await
    }

    async fn delete(&self, id: &str) -> CoreResult<Vec<Transaction>> {
        self.mutate("delete", |transactions| transactions.retain(|t| !t.matches_id(id)))
            .await
    }
}

// ==================== Tests ====================
