//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter; [`api_router`] mounts them all under
//! `/api` next to the `/health` probe.

pub mod error;
pub mod health;
pub mod middleware;
pub mod reminders;
pub mod spending;
pub mod subscriptions;

use axum::Router;

pub use error::{ApiError, ErrorBody};
pub use health::health_router;
pub use reminders::{reminder_router, ReminderAppState};
pub use spending::spending_routes;
pub use subscriptions::{subscription_routes, SubscriptionAppState};

/// Assemble the full API.
pub fn api_router(subscriptions: SubscriptionAppState, reminders: ReminderAppState) -> Router {
    let subscription_api = Router::new()
        .nest("/subscriptions", subscription_routes())
        .merge(spending_routes())
        .with_state(subscriptions);

    let api = Router::new()
        .merge(subscription_api)
        .merge(reminder_router(reminders));

    Router::new().nest("/api", api).merge(health_router())
}
