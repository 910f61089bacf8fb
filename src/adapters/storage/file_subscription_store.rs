//! File-based Subscription Store
//!
//! Stores the subscription list as a single JSON array on disk, the same shape
//! the app keeps in its local storage.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::domain::subscription::Subscription;
use crate::ports::{SubscriptionBatch, SubscriptionReader, SubscriptionRepository};

use super::in_memory_subscription_store::{remove_record, upsert_record};
use super::record::{normalize_all, SubscriptionRecord};

/// JSON file holding an array of subscription records.
#[derive(Debug, Clone)]
pub struct FileSubscriptionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileSubscriptionStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<SubscriptionRecord>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.storage_error("read", e)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let value: Value =
            serde_json::from_str(&raw).map_err(|e| self.storage_error("parse", e))?;
        match value {
            Value::Array(items) => Ok(items.into_iter().map(SubscriptionRecord::new).collect()),
            _ => Err(self.storage_error("parse", "expected a JSON array")),
        }
    }

    async fn write_records(&self, records: Vec<SubscriptionRecord>) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.storage_error("create directory", e))?;
            }
        }
        let array = Value::Array(records.into_iter().map(SubscriptionRecord::into_value).collect());
        let json =
            serde_json::to_string_pretty(&array).map_err(|e| self.storage_error("serialize", e))?;

        // Write to a sibling file then rename so readers never see half a list.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| self.storage_error("write", e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.storage_error("rename", e))
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> DomainError {
        DomainError::storage(format!("Failed to {} subscription file: {}", action, err))
            .with_detail("path", self.path.display().to_string())
    }
}

#[async_trait]
impl SubscriptionReader for FileSubscriptionStore {
    async fn fetch_all(&self) -> Result<SubscriptionBatch, DomainError> {
        let (valid, rejected) = normalize_all(self.read_records().await?);
        Ok(SubscriptionBatch { valid, rejected })
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read_records().await?.len())
    }
}

#[async_trait]
impl SubscriptionRepository for FileSubscriptionStore {
    async fn replace_all(&self, subscriptions: &[Subscription]) -> Result<usize, DomainError> {
        let _guard = self.write_lock.lock().await;
        let records: Vec<_> = subscriptions.iter().map(SubscriptionRecord::from).collect();
        let count = records.len();
        self.write_records(records).await?;
        Ok(count)
    }

    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        upsert_record(&mut records, subscription);
        self.write_records(records).await
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        if !remove_record(&mut records, id) {
            return Ok(false);
        }
        self.write_records(records).await?;
        Ok(true)
    }
}
