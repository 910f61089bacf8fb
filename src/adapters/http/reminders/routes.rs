//! Axum router for reminder endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::cron_auth_middleware;

use super::handlers::{run_reminders, send_notification, ReminderAppState};

/// Create the reminder router.
///
/// # Routes
/// - `GET /cron/reminders` - Scheduled sweep (bearer secret required)
/// - `POST /notifications/send` - Ad hoc push
pub fn reminder_router(state: ReminderAppState) -> Router {
    let cron = Router::new()
        .route("/cron/reminders", get(run_reminders))
        .route_layer(middleware::from_fn_with_state(
            state.cron_auth.clone(),
            cron_auth_middleware,
        ));

    Router::new()
        .merge(cron)
        .route("/notifications/send", post(send_notification))
        .with_state(state)
}
