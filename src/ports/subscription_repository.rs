//! Subscription repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::domain::subscription::Subscription;

/// Write port for stored subscriptions.
///
/// Stores are flat lists keyed by id. There are no partial updates: saving a
/// subscription replaces the whole record.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Replaces the stored list wholesale. Returns the number stored.
    async fn replace_all(&self, subscriptions: &[Subscription]) -> Result<usize, DomainError>;

    /// Inserts or replaces one subscription by id.
    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Removes a subscription. Returns `false` if it was not stored.
    async fn delete(&self, id: &SubscriptionId) -> Result<bool, DomainError>;
}
