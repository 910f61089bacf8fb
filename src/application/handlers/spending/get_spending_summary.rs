//! GetSpendingSummaryHandler - Spend totals in one currency.

use std::sync::Arc;

use crate::domain::spending::{summarize, SpendingSummary};
use crate::domain::subscription::{Currency, SubscriptionError};
use crate::ports::SubscriptionReader;

#[derive(Debug, Clone, Default)]
pub struct GetSpendingSummaryQuery {
    pub currency: Currency,
}

pub type GetSpendingSummaryResult = SpendingSummary;

pub struct GetSpendingSummaryHandler {
    reader: Arc<dyn SubscriptionReader>,
}

impl GetSpendingSummaryHandler {
    pub fn new(reader: Arc<dyn SubscriptionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetSpendingSummaryQuery,
    ) -> Result<GetSpendingSummaryResult, SubscriptionError> {
        let batch = self.reader.fetch_all().await?;
        Ok(summarize(&batch.valid, query.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySubscriptionStore;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[tokio::test]
    async fn summarizes_in_requested_currency() {
        let store = InMemorySubscriptionStore::with_raw(vec![
            json!({ "id": "a", "name": "A", "amount": 127, "currency": "USD", "startDate": "2024-01-01" }),
            json!({ "id": "b", "name": "B", "amount": 12, "currency": "GBP",
                    "billingInterval": "Yearly", "startDate": "2024-01-01" }),
        ]);
        let handler = GetSpendingSummaryHandler::new(Arc::new(store));

        let summary = handler
            .handle(GetSpendingSummaryQuery { currency: Currency::Gbp })
            .await
            .unwrap();

        assert_eq!(summary.currency, Currency::Gbp);
        // 127 USD * 1.27 + 12 GBP / 12
        assert_eq!(summary.monthly_total, Decimal::new(16229, 2));
    }
}
