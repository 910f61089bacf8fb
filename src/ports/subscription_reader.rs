//! Subscription reader port.
//!
//! Every store normalizes its raw records at this boundary. Callers only ever
//! see valid [`Subscription`] values; records that fail normalization come
//! back separately so they can be logged and counted.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::DomainError;
use crate::domain::subscription::Subscription;

/// A stored record that could not be turned into a [`Subscription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// Record id when one could be read.
    pub id: Option<String>,
    pub field: String,
    pub reason: String,
}

/// Result of loading all stored records.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionBatch {
    pub valid: Vec<Subscription>,
    pub rejected: Vec<RejectedRecord>,
}

impl SubscriptionBatch {
    /// Total number of stored records, valid or not.
    pub fn total(&self) -> usize {
        self.valid.len() + self.rejected.len()
    }
}

/// Reader port for stored subscriptions.
#[async_trait]
pub trait SubscriptionReader: Send + Sync {
    /// Loads every stored record.
    ///
    /// Malformed records end up in `rejected`; only an unreadable store is an
    /// error.
    async fn fetch_all(&self) -> Result<SubscriptionBatch, DomainError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.fetch_all().await?.total())
    }
}
