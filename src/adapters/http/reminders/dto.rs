//! HTTP DTOs for the reminder and notification endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response for a completed cron run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronRunResponse {
    pub success: bool,
    pub notified: usize,
}

/// Push endpoint as sent by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushSubscriptionRequest {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

/// Request to push one notification to one endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendNotificationRequest {
    #[serde(default)]
    pub subscription: Option<PushSubscriptionRequest>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn send_request_tolerates_missing_optional_fields() {
        let req: SendNotificationRequest =
            serde_json::from_value(json!({ "subscription": { "endpoint": "https://p" } })).unwrap();
        let sub = req.subscription.unwrap();
        assert_eq!(sub.endpoint.as_deref(), Some("https://p"));
        assert!(sub.keys.is_empty());
        assert!(req.title.is_none());
    }

    #[test]
    fn cron_response_shape() {
        let body = serde_json::to_value(CronRunResponse { success: true, notified: 2 }).unwrap();
        assert_eq!(body, json!({ "success": true, "notified": 2 }));
    }
}
