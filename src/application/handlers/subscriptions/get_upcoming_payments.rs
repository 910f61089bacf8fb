//! GetUpcomingPaymentsHandler - Active subscriptions ordered by next payment.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::spending::{sort_upcoming, upcoming_payment, UpcomingPayment};
use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionReader;

#[derive(Debug, Clone)]
pub struct GetUpcomingPaymentsQuery {
    pub today: NaiveDate,
    /// Only payments due within this many days; all when `None`.
    pub within_days: Option<u32>,
}

pub type GetUpcomingPaymentsResult = Vec<UpcomingPayment>;

pub struct GetUpcomingPaymentsHandler {
    reader: Arc<dyn SubscriptionReader>,
}

impl GetUpcomingPaymentsHandler {
    pub fn new(reader: Arc<dyn SubscriptionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetUpcomingPaymentsQuery,
    ) -> Result<GetUpcomingPaymentsResult, SubscriptionError> {
        let batch = self.reader.fetch_all().await?;

        let mut payments = Vec::with_capacity(batch.valid.len());
        for subscription in &batch.valid {
            match upcoming_payment(subscription, query.today) {
                Ok(Some(payment)) => payments.push(payment),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(subscription_id = %subscription.id, error = %e, "Omitting subscription from upcoming payments");
                }
            }
        }

        if let Some(within) = query.within_days {
            payments.retain(|p| p.days_until_due <= i64::from(within));
        }
        sort_upcoming(&mut payments);
        Ok(payments)
    }
}
