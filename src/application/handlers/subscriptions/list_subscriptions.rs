//! ListSubscriptionsHandler - All stored subscriptions.

use std::sync::Arc;

use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionReader;

#[derive(Debug, Clone, Default)]
pub struct ListSubscriptionsQuery;

pub type ListSubscriptionsResult = Vec<Subscription>;

pub struct ListSubscriptionsHandler {
    reader: Arc<dyn SubscriptionReader>,
}

impl ListSubscriptionsHandler {
    pub fn new(reader: Arc<dyn SubscriptionReader>) -> Self {
        Self { reader }
    }

    /// Returns the valid subscriptions. Malformed records are logged and left
    /// out.
    pub async fn handle(
        &self,
        _query: ListSubscriptionsQuery,
    ) -> Result<ListSubscriptionsResult, SubscriptionError> {
        let batch = self.reader.fetch_all().await?;
        if !batch.rejected.is_empty() {
            tracing::warn!(rejected = batch.rejected.len(), "Stored records failed validation");
        }
        Ok(batch.valid)
    }

    /// Number of stored records, malformed ones included.
    pub async fn count(&self) -> Result<usize, SubscriptionError> {
        Ok(self.reader.count().await?)
    }
}
