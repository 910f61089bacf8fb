//! HTTP handlers for the reminder trigger and ad hoc sends.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::CronAuth;
use crate::application::handlers::reminders::{
    RunReminderSweepCommand, RunReminderSweepHandler, SendNotificationCommand,
    SendNotificationHandler,
};
use crate::domain::subscription::PushSubscription;
use crate::ports::Clock;

use super::dto::{CronRunResponse, SendNotificationRequest, SuccessResponse};

/// Shared state for the reminder endpoints.
#[derive(Clone)]
pub struct ReminderAppState {
    pub sweep_handler: Arc<RunReminderSweepHandler>,
    pub send_handler: Arc<SendNotificationHandler>,
    pub clock: Arc<dyn Clock>,
    pub cron_auth: CronAuth,
}

/// GET /api/cron/reminders - Run one reminder sweep for today.
pub async fn run_reminders(
    State(state): State<ReminderAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let today = state.clock.today();
    let report = state
        .sweep_handler
        .handle(RunReminderSweepCommand { today })
        .await?;

    Ok(Json(CronRunResponse {
        success: true,
        notified: report.notified,
    }))
}

/// POST /api/notifications/send - Push one notification to one endpoint.
pub async fn send_notification(
    State(state): State<ReminderAppState>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = request
        .subscription
        .ok_or_else(|| ApiError::bad_request("Missing subscription"))?;
    let endpoint = subscription
        .endpoint
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing subscription endpoint"))?;
    let target = PushSubscription::new(endpoint, subscription.keys)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    state
        .send_handler
        .handle(SendNotificationCommand {
            target,
            title: request.title,
            body: request.body,
        })
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
