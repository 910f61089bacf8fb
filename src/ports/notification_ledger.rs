//! Notification ledger port.
//!
//! Remembers the last day each subscription was notified so that a second
//! trigger on the same day can be suppressed.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, SubscriptionId};

#[async_trait]
pub trait NotificationLedger: Send + Sync {
    async fn last_notified(&self, id: &SubscriptionId) -> Result<Option<NaiveDate>, DomainError>;

    async fn mark_notified(&self, id: &SubscriptionId, on: NaiveDate) -> Result<(), DomainError>;
}
