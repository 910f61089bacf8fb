//! Subscription module - the tracked recurring payment and its value objects.

mod aggregate;
mod billing_interval;
mod currency;
mod errors;
mod push_endpoint;
mod reminder_lead;

pub use aggregate::Subscription;
pub use billing_interval::BillingInterval;
pub use currency::Currency;
pub use errors::SubscriptionError;
pub use push_endpoint::PushSubscription;
pub use reminder_lead::ReminderLead;
