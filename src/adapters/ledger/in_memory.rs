//! In-memory notification ledger.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::ports::NotificationLedger;

#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationLedger {
    entries: Arc<RwLock<HashMap<SubscriptionId, NaiveDate>>>,
}

impl InMemoryNotificationLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationLedger for InMemoryNotificationLedger {
    async fn last_notified(&self, id: &SubscriptionId) -> Result<Option<NaiveDate>, DomainError> {
        Ok(self.entries.read().await.get(id).copied())
    }

    async fn mark_notified(&self, id: &SubscriptionId, on: NaiveDate) -> Result<(), DomainError> {
        self.entries.write().await.insert(id.clone(), on);
        Ok(())
    }
}
