//! Upcoming payment listing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::billing::{days_between, is_in_trial, next_due_date, BillingError};
use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::{Currency, Subscription};

use super::format_amount;

/// Next payment of one active subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPayment {
    pub id: SubscriptionId,
    pub name: String,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub in_trial: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: Currency,
    pub display_amount: String,
}

/// Next payment of `subscription`, `None` when it is inactive.
pub fn upcoming_payment(
    subscription: &Subscription,
    today: NaiveDate,
) -> Result<Option<UpcomingPayment>, BillingError> {
    if !subscription.is_active {
        return Ok(None);
    }
    let due_date = next_due_date(subscription, today)?;
    Ok(Some(UpcomingPayment {
        id: subscription.id.clone(),
        name: subscription.name.clone(),
        due_date,
        days_until_due: days_between(today, due_date),
        in_trial: is_in_trial(subscription, today),
        amount: subscription.amount,
        currency: subscription.currency,
        display_amount: format_amount(subscription.amount, subscription.currency),
    }))
}

/// Orders payments by due date, then name.
pub fn sort_upcoming(payments: &mut [UpcomingPayment]) {
    payments.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.name.cmp(&b.name)));
}
