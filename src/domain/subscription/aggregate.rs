//! Subscription aggregate.
//!
//! A tracked recurring payment. Instances are only built through
//! [`Subscription::new`] (or the record normalizer at the storage boundary),
//! so every `Subscription` in memory has a non-empty name, a positive amount
//! and a real start date. The reminder engine reads subscriptions and never
//! mutates them; an edit replaces the whole record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::{SubscriptionId, ValidationError};

use super::{BillingInterval, Currency, PushSubscription, ReminderLead};

/// A recurring payment the user is tracking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,

    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    pub currency: Currency,

    pub billing_interval: BillingInterval,

    /// First billing date; every later occurrence is computed from it.
    pub start_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub is_active: bool,

    pub trial_period: bool,

    /// Last day of the trial, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_ends_on: Option<NaiveDate>,

    #[serde(rename = "reminderDays")]
    pub reminder_lead: ReminderLead,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_subscription: Option<PushSubscription>,
}

impl Subscription {
    /// Creates an active subscription with no trial, no reminder and no push
    /// endpoint.
    pub fn new(
        id: SubscriptionId,
        name: impl Into<String>,
        amount: Decimal,
        currency: Currency,
        billing_interval: BillingInterval,
        start_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("must be positive, got {}", amount),
            ));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            amount,
            currency,
            billing_interval,
            start_date,
            category: None,
            is_active: true,
            trial_period: false,
            trial_ends_on: None,
            reminder_lead: ReminderLead::Off,
            push_subscription: None,
        })
    }

    /// Marks the subscription as being in a free trial ending on `ends_on`.
    pub fn with_trial(mut self, ends_on: NaiveDate) -> Self {
        self.trial_period = true;
        self.trial_ends_on = Some(ends_on);
        self
    }

    pub fn with_reminder(mut self, lead: ReminderLead) -> Self {
        self.reminder_lead = lead;
        self
    }

    pub fn with_push(mut self, push: PushSubscription) -> Self {
        self.push_subscription = Some(push);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Category used for grouping, "Other" when none was given.
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("Other")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn netflix() -> Subscription {
        Subscription::new(
            SubscriptionId::parse("s1").unwrap(),
            "Netflix",
            dec("15.99"),
            Currency::Usd,
            BillingInterval::Monthly,
            date(2024, 1, 15),
        )
        .unwrap()
    }

    #[test]
    fn new_subscription_has_defaults() {
        let sub = netflix();
        assert!(sub.is_active);
        assert!(!sub.trial_period);
        assert!(sub.reminder_lead.is_off());
        assert!(sub.push_subscription.is_none());
    }

    #[test]
    fn rejects_blank_name() {
        let err = Subscription::new(
            SubscriptionId::new(),
            "  ",
            dec("1"),
            Currency::Usd,
            BillingInterval::Monthly,
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn rejects_non_positive_amount() {
        let err = Subscription::new(
            SubscriptionId::new(),
            "Gym",
            Decimal::ZERO,
            Currency::Usd,
            BillingInterval::Monthly,
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn serializes_in_canonical_camel_case() {
        let sub = netflix().with_reminder(ReminderLead::DaysBefore(3));
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["startDate"], "2024-01-15");
        assert_eq!(json["billingInterval"], "Monthly");
        assert_eq!(json["reminderDays"], 3);
        assert_eq!(json["isActive"], true);
        assert_eq!(json["amount"], 15.99);
        assert!(json.get("reminder_days").is_none());
        assert!(json.get("pushSubscription").is_none());
    }

    #[test]
    fn category_falls_back_to_other() {
        assert_eq!(netflix().category_or_default(), "Other");
        assert_eq!(
            netflix().with_category("Streaming").category_or_default(),
            "Streaming"
        );
    }
}
