//! HTTP handlers for subscription endpoints.
//!
//! These handlers connect Axum routes to the subscription command/query
//! handlers. Incoming records are normalized here, at the boundary.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::reminders::dto::SuccessResponse;
use crate::adapters::storage::{normalize_all, SubscriptionRecord};
use crate::application::handlers::subscriptions::{
    DeleteSubscriptionCommand, DeleteSubscriptionHandler, GetUpcomingPaymentsHandler,
    GetUpcomingPaymentsQuery, ListSubscriptionsHandler, ListSubscriptionsQuery,
    SaveSubscriptionCommand, SaveSubscriptionHandler, SyncSubscriptionsCommand,
    SyncSubscriptionsHandler,
};
use crate::domain::foundation::SubscriptionId;
use crate::ports::{Clock, SubscriptionReader, SubscriptionRepository};

use super::dto::{
    CountResponse, SubscriptionListResponse, SyncResponse, UpcomingParams, UpcomingResponse,
};

/// Shared state for subscription and spending endpoints.
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub reader: Arc<dyn SubscriptionReader>,
    pub repository: Arc<dyn SubscriptionRepository>,
    pub clock: Arc<dyn Clock>,
}

impl SubscriptionAppState {
    pub fn sync_handler(&self) -> SyncSubscriptionsHandler {
        SyncSubscriptionsHandler::new(self.repository.clone())
    }

    pub fn save_handler(&self) -> SaveSubscriptionHandler {
        SaveSubscriptionHandler::new(self.repository.clone())
    }

    pub fn delete_handler(&self) -> DeleteSubscriptionHandler {
        DeleteSubscriptionHandler::new(self.repository.clone())
    }

    pub fn list_handler(&self) -> ListSubscriptionsHandler {
        ListSubscriptionsHandler::new(self.reader.clone())
    }

    pub fn upcoming_handler(&self) -> GetUpcomingPaymentsHandler {
        GetUpcomingPaymentsHandler::new(self.reader.clone())
    }
}

/// POST /api/subscriptions/sync - Replace the stored list with the device's.
pub async fn sync_subscriptions(
    State(state): State<SubscriptionAppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let records = match body.get("subscriptions") {
        Some(Value::Array(items)) => items.clone(),
        _ => return Err(ApiError::bad_request("Invalid subscriptions array")),
    };

    let (subscriptions, rejected) =
        normalize_all(records.into_iter().map(SubscriptionRecord::new));
    let result = state
        .sync_handler()
        .handle(SyncSubscriptionsCommand {
            subscriptions,
            rejected,
        })
        .await?;

    Ok(Json(SyncResponse {
        success: true,
        count: result.stored,
        rejected: result.rejected,
    }))
}

/// GET /api/subscriptions/sync - Number of stored records.
pub async fn sync_status(
    State(state): State<SubscriptionAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let count = state.list_handler().count().await?;
    Ok(Json(CountResponse { count }))
}

/// POST /api/subscriptions - Insert or replace one record by id.
pub async fn save_subscription(
    State(state): State<SubscriptionAppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = SubscriptionRecord::new(body)
        .normalize()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    state
        .save_handler()
        .handle(SaveSubscriptionCommand { subscription })
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/subscriptions - All valid stored subscriptions.
pub async fn list_subscriptions(
    State(state): State<SubscriptionAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let subscriptions = state.list_handler().handle(ListSubscriptionsQuery).await?;
    Ok(Json(SubscriptionListResponse { subscriptions }))
}

/// DELETE /api/subscriptions/:id
pub async fn delete_subscription(
    State(state): State<SubscriptionAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = SubscriptionId::parse(id).map_err(|e| ApiError::bad_request(e.to_string()))?;
    state
        .delete_handler()
        .handle(DeleteSubscriptionCommand { id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/subscriptions/upcoming - Next payments, soonest first.
pub async fn upcoming_payments(
    State(state): State<SubscriptionAppState>,
    Query(params): Query<UpcomingParams>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state
        .upcoming_handler()
        .handle(GetUpcomingPaymentsQuery {
            today: state.clock.today(),
            within_days: params.within_days,
        })
        .await?;
    Ok(Json(UpcomingResponse { payments }))
}
