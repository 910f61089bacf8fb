//! Web push endpoint descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::ValidationError;

/// Browser push subscription as handed out by the Push API.
///
/// `keys` normally carries `p256dh` and `auth`, the browser's payload
/// encryption keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

impl PushSubscription {
    /// Creates a push subscription, validating the endpoint URL scheme.
    pub fn new(
        endpoint: impl Into<String>,
        keys: BTreeMap<String, String>,
    ) -> Result<Self, ValidationError> {
        let endpoint = endpoint.into();
        let trimmed = endpoint.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("pushSubscription.endpoint"));
        }
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(ValidationError::invalid_format(
                "pushSubscription.endpoint",
                "expected an http(s) URL",
            ));
        }
        Ok(Self {
            endpoint: trimmed.to_string(),
            keys,
        })
    }

    pub fn key(&self, name: &str) -> Option<&str> {
        self.keys.get(name).map(String::as_str)
    }
}
