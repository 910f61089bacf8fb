//! HTTP adapter for the spending summary.

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;
use axum::{routing::get, Router};
use serde::Deserialize;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::subscriptions::SubscriptionAppState;
use crate::application::handlers::spending::{GetSpendingSummaryHandler, GetSpendingSummaryQuery};
use crate::domain::subscription::Currency;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpendingParams {
    #[serde(default)]
    pub currency: Option<String>,
}

/// GET /api/spending - Totals converted into `currency` (USD by default).
pub async fn spending_summary(
    State(state): State<SubscriptionAppState>,
    Query(params): Query<SpendingParams>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = match params.currency.as_deref() {
        Some(code) => code
            .parse::<Currency>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
        None => Currency::default(),
    };

    let summary = GetSpendingSummaryHandler::new(state.reader.clone())
        .handle(GetSpendingSummaryQuery { currency })
        .await?;
    Ok(Json(summary))
}

pub fn spending_routes() -> Router<SubscriptionAppState> {
    Router::new().route("/spending", get(spending_summary))
}
