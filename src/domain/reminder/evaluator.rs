//! Reminder evaluation.
//!
//! Decides whether a subscription's reminder fires on a given day. Shared by
//! the server sweep and the device loop so both produce the same text.

use chrono::NaiveDate;

use crate::domain::billing::{days_between, next_due_date, BillingError};
use crate::domain::subscription::Subscription;

use super::{reminder_message, ReminderEvent};

/// Where a reminder would be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Web push from the server; requires a stored push endpoint.
    Push,
    /// Local notification on the user's device.
    Device,
}

/// Why no reminder fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Inactive,
    RemindersOff,
    NoPushEndpoint,
    NotToday {
        due_date: NaiveDate,
        notify_on_in_days: i64,
    },
    /// The calculator returned a date before today. Never expected.
    DueDateInPast { due_date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    Fire(ReminderEvent),
    Skip(SkipReason),
}

impl ReminderOutcome {
    pub fn into_event(self) -> Option<ReminderEvent> {
        match self {
            ReminderOutcome::Fire(event) => Some(event),
            ReminderOutcome::Skip(_) => None,
        }
    }
}

/// Evaluates `subscription` for `target`, reporting why it was skipped.
pub fn assess(
    subscription: &Subscription,
    today: NaiveDate,
    target: DeliveryTarget,
) -> Result<ReminderOutcome, BillingError> {
    if !subscription.is_active {
        return Ok(ReminderOutcome::Skip(SkipReason::Inactive));
    }
    let lead = match subscription.reminder_lead.days() {
        Some(days) => i64::from(days),
        None => return Ok(ReminderOutcome::Skip(SkipReason::RemindersOff)),
    };
    if target == DeliveryTarget::Push && subscription.push_subscription.is_none() {
        return Ok(ReminderOutcome::Skip(SkipReason::NoPushEndpoint));
    }

    let due_date = next_due_date(subscription, today)?;
    let due_in_days = days_between(today, due_date);
    if due_in_days < 0 {
        return Ok(ReminderOutcome::Skip(SkipReason::DueDateInPast { due_date }));
    }

    // notify_on = due_date - lead, compared against today
    if due_in_days != lead {
        return Ok(ReminderOutcome::Skip(SkipReason::NotToday {
            due_date,
            notify_on_in_days: due_in_days - lead,
        }));
    }

    match reminder_message(&subscription.name, due_in_days) {
        Some((title, body)) => Ok(ReminderOutcome::Fire(ReminderEvent {
            subscription_id: subscription.id.clone(),
            title,
            body,
            due_date,
            due_in_days,
        })),
        None => Ok(ReminderOutcome::Skip(SkipReason::DueDateInPast { due_date })),
    }
}

/// Returns the push reminder for `subscription` if one fires `today`.
pub fn evaluate(
    subscription: &Subscription,
    today: NaiveDate,
) -> Result<Option<ReminderEvent>, BillingError> {
    Ok(assess(subscription, today, DeliveryTarget::Push)?.into_event())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SubscriptionId;
    use crate::domain::subscription::{
        BillingInterval, Currency, PushSubscription, ReminderLead,
    };
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn push() -> PushSubscription {
        PushSubscription::new("https://push.example.com/ep", BTreeMap::new()).unwrap()
    }

    fn netflix(lead: i64) -> Subscription {
        Subscription::new(
            SubscriptionId::parse("netflix").unwrap(),
            "Netflix",
            Decimal::new(1599, 2),
            Currency::Usd,
            BillingInterval::Monthly,
            date(2024, 1, 15),
        )
        .unwrap()
        .with_reminder(ReminderLead::from_days(lead))
        .with_push(push())
    }

    #[test]
    fn fires_three_days_before_due_date() {
        let event = evaluate(&netflix(3), date(2024, 2, 12)).unwrap().unwrap();
        assert_eq!(event.title, "Upcoming Payment");
        assert_eq!(event.body, "Your Netflix subscription is due in 3 days.");
        assert_eq!(event.due_date, date(2024, 2, 15));
        assert_eq!(event.due_in_days, 3);
    }

    #[test]
    fn does_not_fire_the_day_before_notify_date() {
        assert!(evaluate(&netflix(3), date(2024, 2, 11)).unwrap().is_none());
        let outcome = assess(&netflix(3), date(2024, 2, 11), DeliveryTarget::Push).unwrap();
        assert_eq!(
            outcome,
            ReminderOutcome::Skip(SkipReason::NotToday {
                due_date: date(2024, 2, 15),
                notify_on_in_days: 1,
            })
        );
    }

    #[test]
    fn lead_of_one_day_says_tomorrow() {
        let event = evaluate(&netflix(1), date(2024, 2, 14)).unwrap().unwrap();
        assert_eq!(event.title, "Payment Due Tomorrow");
        assert_eq!(event.body, "Your Netflix subscription is due tomorrow!");
    }

    #[test]
    fn lead_of_zero_never_fires() {
        let sub = netflix(0);
        let mut today = date(2024, 1, 1);
        while today < date(2024, 4, 1) {
            assert!(evaluate(&sub, today).unwrap().is_none());
            today = today.succ_opt().unwrap();
        }
        assert_eq!(
            assess(&sub, date(2024, 2, 15), DeliveryTarget::Device).unwrap(),
            ReminderOutcome::Skip(SkipReason::RemindersOff)
        );
    }

    #[test]
    fn inactive_never_fires() {
        let sub = netflix(3).with_active(false);
        assert_eq!(
            assess(&sub, date(2024, 2, 12), DeliveryTarget::Push).unwrap(),
            ReminderOutcome::Skip(SkipReason::Inactive)
        );
    }

    #[test]
    fn push_target_requires_endpoint_but_device_does_not() {
        let mut sub = netflix(3);
        sub.push_subscription = None;
        assert_eq!(
            assess(&sub, date(2024, 2, 12), DeliveryTarget::Push).unwrap(),
            ReminderOutcome::Skip(SkipReason::NoPushEndpoint)
        );
        let event = assess(&sub, date(2024, 2, 12), DeliveryTarget::Device)
            .unwrap()
            .into_event()
            .unwrap();
        assert_eq!(event.body, "Your Netflix subscription is due in 3 days.");
    }

    #[test]
    fn both_targets_produce_identical_text() {
        let sub = netflix(7);
        let today = date(2024, 3, 8);
        let push = assess(&sub, today, DeliveryTarget::Push).unwrap().into_event();
        let device = assess(&sub, today, DeliveryTarget::Device).unwrap().into_event();
        assert!(push.is_some());
        assert_eq!(push, device);
    }

    #[test]
    fn trial_reminder_targets_first_paid_bill() {
        let sub = netflix(2).with_trial(date(2024, 2, 10));
        let outcome = assess(&sub, date(2024, 2, 8), DeliveryTarget::Push).unwrap();
        assert_eq!(
            outcome,
            ReminderOutcome::Skip(SkipReason::NotToday {
                due_date: date(2024, 3, 10),
                notify_on_in_days: 29,
            })
        );
    }

    #[test]
    fn after_trial_reminders_follow_start_date() {
        let sub = netflix(2).with_trial(date(2024, 2, 10));
        let event = evaluate(&sub, date(2024, 3, 13)).unwrap().unwrap();
        assert_eq!(event.due_date, date(2024, 3, 15));
        assert_eq!(event.body, "Your Netflix subscription is due in 2 days.");
    }

    #[test]
    fn start_date_in_future_fires_before_first_bill() {
        let mut sub = netflix(7);
        sub.start_date = date(2024, 5, 20);
        let event = evaluate(&sub, date(2024, 5, 13)).unwrap().unwrap();
        assert_eq!(event.due_date, date(2024, 5, 20));
    }
}
