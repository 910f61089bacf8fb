//! Reminder module - deciding which reminders fire and what they say.

mod errors;
mod evaluator;
mod event;

pub use errors::ReminderError;
pub use evaluator::{assess, evaluate, DeliveryTarget, ReminderOutcome, SkipReason};
pub use event::{reminder_message, PushPayload, ReminderEvent, DEFAULT_TITLE};
