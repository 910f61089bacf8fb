//! Billing module - recurring billing date calculation.
//!
//! Pure functions over [`Subscription`](crate::domain::subscription::Subscription)
//! values and calendar dates. "Today" is always passed in by the caller.

mod calendar;
mod errors;
mod next_due;

pub use calendar::{add_intervals, days_between, parse_calendar_date};
pub use errors::BillingError;
pub use next_due::{is_in_trial, next_due_date, next_occurrence};
