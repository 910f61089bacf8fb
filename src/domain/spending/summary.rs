//! Spending totals across active subscriptions.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::{BillingInterval, Currency, Subscription};

use super::convert;

/// Average number of weeks in a month.
const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Monthly spend of one subscription in the summary currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSpend {
    pub id: SubscriptionId,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly: Decimal,
}

/// Monthly, yearly and weekly spend in one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub currency: Currency,
    pub active_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub yearly_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_total: Decimal,
    /// Sorted by monthly spend, largest first.
    pub by_category: Vec<CategorySpend>,
    pub subscriptions: Vec<SubscriptionSpend>,
}

/// What `subscription` costs per month in its own currency.
pub fn monthly_equivalent(subscription: &Subscription) -> Decimal {
    match subscription.billing_interval {
        BillingInterval::Monthly => subscription.amount,
        BillingInterval::Yearly => subscription.amount / Decimal::from(12),
    }
}

/// Summarizes active subscriptions in `currency`. Inactive ones are ignored.
pub fn summarize(subscriptions: &[Subscription], currency: Currency) -> SpendingSummary {
    let mut monthly_total = Decimal::ZERO;
    let mut categories: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut spends = Vec::new();

    for sub in subscriptions.iter().filter(|s| s.is_active) {
        let monthly = convert(monthly_equivalent(sub), sub.currency, currency);
        monthly_total += monthly;
        *categories
            .entry(sub.category_or_default().to_string())
            .or_insert(Decimal::ZERO) += monthly;
        spends.push(SubscriptionSpend {
            id: sub.id.clone(),
            name: sub.name.clone(),
            category: sub.category_or_default().to_string(),
            monthly: monthly.round_dp(2),
        });
    }

    let mut by_category: Vec<CategorySpend> = categories
        .into_iter()
        .map(|(category, monthly)| CategorySpend {
            category,
            monthly: monthly.round_dp(2),
        })
        .collect();
    by_category.sort_by(|a, b| b.monthly.cmp(&a.monthly).then(a.category.cmp(&b.category)));

    SpendingSummary {
        currency,
        active_count: spends.len(),
        monthly_total: monthly_total.round_dp(2),
        yearly_total: (monthly_total * Decimal::from(12)).round_dp(2),
        weekly_total: (monthly_total / WEEKS_PER_MONTH).round_dp(2),
        by_category,
        subscriptions: spends,
    }
}
