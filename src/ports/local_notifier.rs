//! Local notifier port - on-device notifications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Notification permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// The user was never asked.
    #[default]
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Notification failed: {0}")]
pub struct NotifierError(pub String);

/// Port for showing notifications on the user's own device.
#[async_trait]
pub trait LocalNotifier: Send + Sync {
    async fn permission(&self) -> NotificationPermission;

    /// Shows a notification. A later notification with the same `tag`
    /// replaces this one.
    async fn show(&self, title: &str, body: &str, tag: &str) -> Result<(), NotifierError>;
}
