//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod reminders;
pub mod spending;
pub mod subscriptions;
