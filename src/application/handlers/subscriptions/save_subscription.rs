//! SaveSubscriptionHandler - Insert or replace one subscription.

use std::sync::Arc;

use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

#[derive(Debug, Clone)]
pub struct SaveSubscriptionCommand {
    pub subscription: Subscription,
}

pub struct SaveSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl SaveSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SaveSubscriptionCommand) -> Result<(), SubscriptionError> {
        self.repository.upsert(&cmd.subscription).await?;
        tracing::debug!(subscription_id = %cmd.subscription.id, "Subscription saved");
        Ok(())
    }
}
