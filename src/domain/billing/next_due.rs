//! Next due date calculation.

use chrono::{Datelike, NaiveDate};

use crate::domain::subscription::{BillingInterval, Subscription};

use super::{add_intervals, BillingError};

/// True while the subscription's free trial has not ended.
///
/// The trial end date is inclusive. A trial flag without an end date counts
/// as no trial.
pub fn is_in_trial(subscription: &Subscription, today: NaiveDate) -> bool {
    subscription.trial_period
        && subscription
            .trial_ends_on
            .map_or(false, |ends_on| ends_on >= today)
}

/// Returns the next unbilled payment date of `subscription` as seen on `today`.
///
/// During a trial the first bill is one interval after the trial ends. A
/// start date on or after today is returned as is, so a subscription that
/// starts today is due today.
pub fn next_due_date(
    subscription: &Subscription,
    today: NaiveDate,
) -> Result<NaiveDate, BillingError> {
    if is_in_trial(subscription, today) {
        if let Some(ends_on) = subscription.trial_ends_on {
            return add_intervals(ends_on, subscription.billing_interval, 1);
        }
    }
    next_occurrence(
        subscription.start_date,
        subscription.billing_interval,
        today,
    )
}

/// First of `anchor + k intervals` (k >= 1) strictly after `today`, or the
/// anchor itself when it is not in the past.
pub fn next_occurrence(
    anchor: NaiveDate,
    interval: BillingInterval,
    today: NaiveDate,
) -> Result<NaiveDate, BillingError> {
    if anchor >= today {
        return Ok(anchor);
    }

    // Jump close to today instead of stepping one interval at a time. The
    // estimate never overshoots: occurrence k-1 falls in an earlier month
    // than today.
    let months_elapsed = (today.year() - anchor.year()) * 12 + today.month() as i32
        - anchor.month() as i32;
    let step = interval.months() as i32;
    let mut k = u32::try_from((months_elapsed / step).max(1)).unwrap_or(1);

    loop {
        let candidate = add_intervals(anchor, interval, k)?;
        if candidate > today {
            return Ok(candidate);
        }
        k = k.checked_add(1).ok_or(BillingError::OutOfRange {
            anchor,
            months: u64::from(k) * u64::from(interval.months()),
        })?;
    }
}
