//! DeleteSubscriptionHandler - Remove one subscription.

use std::sync::Arc;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionRepository;

#[derive(Debug, Clone)]
pub struct DeleteSubscriptionCommand {
    pub id: SubscriptionId,
}

pub struct DeleteSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl DeleteSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteSubscriptionCommand) -> Result<(), SubscriptionError> {
        if !self.repository.delete(&cmd.id).await? {
            return Err(SubscriptionError::not_found(cmd.id));
        }
        tracing::info!(subscription_id = %cmd.id, "Subscription deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySubscriptionStore;
    use crate::application::handlers::subscriptions::{
        SaveSubscriptionCommand, SaveSubscriptionHandler,
    };
    use crate::domain::subscription::{BillingInterval, Currency, Subscription};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn deletes_saved_subscription_then_reports_not_found() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        let id = SubscriptionId::parse("gym").unwrap();
        let sub = Subscription::new(
            id.clone(),
            "Gym",
            Decimal::new(30, 0),
            Currency::Usd,
            BillingInterval::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap();
        SaveSubscriptionHandler::new(store.clone())
            .handle(SaveSubscriptionCommand { subscription: sub })
            .await
            .unwrap();

        let handler = DeleteSubscriptionHandler::new(store);
        handler
            .handle(DeleteSubscriptionCommand { id: id.clone() })
            .await
            .unwrap();
        let err = handler
            .handle(DeleteSubscriptionCommand { id: id.clone() })
            .await
            .unwrap_err();

        assert_eq!(err, SubscriptionError::not_found(id));
    }
}
