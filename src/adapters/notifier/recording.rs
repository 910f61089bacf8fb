//! Recording notifier for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{LocalNotifier, NotificationPermission, NotifierError};

/// A notification that was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownNotification {
    pub title: String,
    pub body: String,
    pub tag: String,
}

#[derive(Default)]
struct RecordingState {
    permission: NotificationPermission,
    shown: Vec<ShownNotification>,
    fail_with: Option<String>,
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<RecordingState>>,
}

impl RecordingNotifier {
    /// A notifier whose permission is `permission`.
    pub fn with_permission(permission: NotificationPermission) -> Self {
        let notifier = Self::default();
        notifier.set_permission(permission);
        notifier
    }

    pub fn set_permission(&self, permission: NotificationPermission) {
        self.inner.lock().unwrap().permission = permission;
    }

    /// Makes every `show` fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.inner.lock().unwrap().fail_with = Some(message.into());
    }

    pub fn shown(&self) -> Vec<ShownNotification> {
        self.inner.lock().unwrap().shown.clone()
    }
}

#[async_trait]
impl LocalNotifier for RecordingNotifier {
    async fn permission(&self) -> NotificationPermission {
        self.inner.lock().unwrap().permission
    }

    async fn show(&self, title: &str, body: &str, tag: &str) -> Result<(), NotifierError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(message) = &state.fail_with {
            return Err(NotifierError(message.clone()));
        }
        state.shown.push(ShownNotification {
            title: title.to_string(),
            body: body.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}
