//! Subscription handlers.
//!
//! ## Commands
//! - Syncing the device list (wholesale replace)
//! - Saving one subscription (upsert by id)
//! - Deleting a subscription
//!
//! ## Queries
//! - Listing and counting stored subscriptions
//! - Upcoming payments

mod delete_subscription;
mod get_upcoming_payments;
mod list_subscriptions;
mod save_subscription;
mod sync_subscriptions;

// Commands
pub use delete_subscription::{DeleteSubscriptionCommand, DeleteSubscriptionHandler};
pub use save_subscription::{SaveSubscriptionCommand, SaveSubscriptionHandler};
pub use sync_subscriptions::{
    SyncSubscriptionsCommand, SyncSubscriptionsHandler, SyncSubscriptionsResult,
};

// Queries
pub use get_upcoming_payments::{
    GetUpcomingPaymentsHandler, GetUpcomingPaymentsQuery, GetUpcomingPaymentsResult,
};
pub use list_subscriptions::{
    ListSubscriptionsHandler, ListSubscriptionsQuery, ListSubscriptionsResult,
};
