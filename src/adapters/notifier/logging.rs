//! Notifier that writes notifications to the log.
//!
//! Stands in for the device's notification center when the reminder loop runs
//! headless next to the server.

use async_trait::async_trait;

use crate::ports::{LocalNotifier, NotificationPermission, NotifierError};

#[derive(Debug, Clone)]
pub struct LoggingNotifier {
    permission: NotificationPermission,
}

impl LoggingNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self { permission }
    }
}

impl Default for LoggingNotifier {
    fn default() -> Self {
        Self::new(NotificationPermission::Granted)
    }
}

#[async_trait]
impl LocalNotifier for LoggingNotifier {
    async fn permission(&self) -> NotificationPermission {
        self.permission
    }

    async fn show(&self, title: &str, body: &str, tag: &str) -> Result<(), NotifierError> {
        tracing::info!(title, body, tag, "Local notification");
        Ok(())
    }
}
