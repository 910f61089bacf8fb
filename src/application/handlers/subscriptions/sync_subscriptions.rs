//! SyncSubscriptionsHandler - Replace the server-side list with the device's.

use std::sync::Arc;

use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{RejectedRecord, SubscriptionRepository};

/// Command carrying the device's list, already normalized.
#[derive(Debug, Clone)]
pub struct SyncSubscriptionsCommand {
    pub subscriptions: Vec<Subscription>,
    /// Records from the device that failed normalization. Dropped, but logged.
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSubscriptionsResult {
    pub stored: usize,
    pub rejected: usize,
}

pub struct SyncSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl SyncSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: SyncSubscriptionsCommand,
    ) -> Result<SyncSubscriptionsResult, SubscriptionError> {
        for rejected in &cmd.rejected {
            tracing::warn!(
                subscription_id = rejected.id.as_deref().unwrap_or("<none>"),
                field = %rejected.field,
                reason = %rejected.reason,
                "Dropping malformed record from sync"
            );
        }

        let stored = self.repository.replace_all(&cmd.subscriptions).await?;
        tracing::info!(stored, rejected = cmd.rejected.len(), "Subscriptions synced");

        Ok(SyncSubscriptionsResult {
            stored,
            rejected: cmd.rejected.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemorySubscriptionStore, UnavailableStore};
    use crate::domain::foundation::SubscriptionId;
    use crate::domain::subscription::{BillingInterval, Currency};
    use crate::ports::SubscriptionReader;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn sub(id: &str) -> Subscription {
        Subscription::new(
            SubscriptionId::parse(id).unwrap(),
            id,
            Decimal::ONE,
            Currency::Usd,
            BillingInterval::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn replaces_list_and_reports_counts() {
        let store = Arc::new(InMemorySubscriptionStore::with_subscriptions(&[sub("old")]));
        let handler = SyncSubscriptionsHandler::new(store.clone());

        let result = handler
            .handle(SyncSubscriptionsCommand {
                subscriptions: vec![sub("a"), sub("b")],
                rejected: vec![RejectedRecord {
                    id: Some("c".to_string()),
                    field: "startDate".to_string(),
                    reason: "bad".to_string(),
                }],
            })
            .await
            .unwrap();

        assert_eq!(result, SyncSubscriptionsResult { stored: 2, rejected: 1 });
        assert_eq!(store.fetch_all().await.unwrap().valid.len(), 2);
    }

    #[tokio::test]
    async fn read_only_store_is_infrastructure_error() {
        let handler = SyncSubscriptionsHandler::new(Arc::new(UnavailableStore::read_only("postgres")));
        let err = handler
            .handle(SyncSubscriptionsCommand { subscriptions: vec![], rejected: vec![] })
            .await
            .unwrap_err();
        assert!(matches!(err, SubscriptionError::Infrastructure(_)));
    }
}
