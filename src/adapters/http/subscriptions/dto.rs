//! HTTP DTOs for the subscription endpoints.
//!
//! Request bodies stay as raw JSON until they pass through
//! [`SubscriptionRecord`](crate::adapters::storage::SubscriptionRecord)
//! normalization, so camelCase and snake_case payloads are both accepted.

use serde::{Deserialize, Serialize};

use crate::domain::spending::UpcomingPayment;
use crate::domain::subscription::Subscription;

/// Response for a completed sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub success: bool,
    pub count: usize,
    pub rejected: usize,
}

/// Number of stored records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}

/// All stored subscriptions in canonical shape.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionListResponse {
    pub subscriptions: Vec<Subscription>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpcomingParams {
    #[serde(default)]
    pub within_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingResponse {
    pub payments: Vec<UpcomingPayment>,
}
