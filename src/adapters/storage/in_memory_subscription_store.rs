//! In-Memory Subscription Store
//!
//! Keeps raw records in memory and normalizes them on read, exactly like the
//! persistent stores. Useful for testing, development and single-process
//! deployments.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::domain::subscription::Subscription;
use crate::ports::{SubscriptionBatch, SubscriptionReader, SubscriptionRepository};

use super::record::{normalize_all, SubscriptionRecord};

/// In-memory list of subscription records.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionStore {
    records: Arc<RwLock<Vec<SubscriptionRecord>>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with subscriptions.
    pub fn with_subscriptions(subscriptions: &[Subscription]) -> Self {
        Self::with_records(subscriptions.iter().map(SubscriptionRecord::from).collect())
    }

    /// Create a store pre-filled with raw records, malformed ones included.
    pub fn with_raw(values: Vec<Value>) -> Self {
        Self::with_records(values.into_iter().map(SubscriptionRecord::new).collect())
    }

    fn with_records(records: Vec<SubscriptionRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Number of stored records (useful for tests).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SubscriptionReader for InMemorySubscriptionStore {
    async fn fetch_all(&self) -> Result<SubscriptionBatch, DomainError> {
        let records = self.records.read().await.clone();
        let (valid, rejected) = normalize_all(records);
        Ok(SubscriptionBatch { valid, rejected })
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.len().await)
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionStore {
    async fn replace_all(&self, subscriptions: &[Subscription]) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        *records = subscriptions.iter().map(SubscriptionRecord::from).collect();
        Ok(records.len())
    }

    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        upsert_record(&mut records, subscription);
        Ok(())
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(remove_record(&mut records, id))
    }
}

/// Replaces the record with the same id, or appends.
pub(super) fn upsert_record(records: &mut Vec<SubscriptionRecord>, subscription: &Subscription) {
    let record = SubscriptionRecord::from(subscription);
    match records
        .iter()
        .position(|r| r.raw_id().as_deref() == Some(subscription.id.as_str()))
    {
        Some(index) => records[index] = record,
        None => records.push(record),
    }
}

/// Removes every record with `id`. Returns whether anything was removed.
pub(super) fn remove_record(records: &mut Vec<SubscriptionRecord>, id: &SubscriptionId) -> bool {
    let before = records.len();
    records.retain(|r| r.raw_id().as_deref() != Some(id.as_str()));
    records.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::{BillingInterval, Currency};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn sub(id: &str, name: &str) -> Subscription {
        Subscription::new(
            SubscriptionId::parse(id).unwrap(),
            name,
            Decimal::new(500, 2),
            Currency::Usd,
            BillingInterval::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn empty_store_returns_empty_batch() {
        let store = InMemorySubscriptionStore::new();
        let batch = store.fetch_all().await.unwrap();
        assert!(batch.valid.is_empty());
        assert!(batch.rejected.is_empty());
    }

    #[tokio::test]
    async fn upsert_inserts_then_replaces() {
        let store = InMemorySubscriptionStore::new();
        store.upsert(&sub("a", "Old")).await.unwrap();
        store.upsert(&sub("a", "New")).await.unwrap();
        store.upsert(&sub("b", "Other")).await.unwrap();

        let batch = store.fetch_all().await.unwrap();
        assert_eq!(batch.valid.len(), 2);
        assert_eq!(batch.valid[0].name, "New");
    }

    #[tokio::test]
    async fn replace_all_swaps_list() {
        let store = InMemorySubscriptionStore::with_subscriptions(&[sub("a", "A")]);
        let stored = store.replace_all(&[sub("x", "X"), sub("y", "Y")]).await.unwrap();
        assert_eq!(stored, 2);
        let ids: Vec<_> = store
            .fetch_all()
            .await
            .unwrap()
            .valid
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let store = InMemorySubscriptionStore::with_subscriptions(&[sub("a", "A")]);
        let id = SubscriptionId::parse("a").unwrap();
        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn malformed_raw_records_are_rejected_not_returned() {
        let store = InMemorySubscriptionStore::with_raw(vec![
            json!({ "id": "ok", "name": "Fine", "amount": 3, "startDate": "2024-01-01" }),
            json!({ "id": "bad", "name": "Broken", "amount": 3, "startDate": "yesterday" }),
        ]);
        let batch = store.fetch_all().await.unwrap();
        assert_eq!(batch.valid.len(), 1);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
