//! SendNotificationHandler - Ad hoc push to one endpoint.

use std::time::Duration;

use crate::domain::reminder::{PushPayload, ReminderError, DEFAULT_TITLE};
use crate::domain::subscription::PushSubscription;

use super::PushSetup;

#[derive(Debug, Clone)]
pub struct SendNotificationCommand {
    pub target: PushSubscription,
    pub title: Option<String>,
    pub body: Option<String>,
}

pub struct SendNotificationHandler {
    push: PushSetup,
    timeout: Duration,
}

impl SendNotificationHandler {
    pub fn new(push: PushSetup, timeout: Duration) -> Self {
        Self { push, timeout }
    }

    pub async fn handle(&self, cmd: SendNotificationCommand) -> Result<(), ReminderError> {
        let transport = self.push.transport()?;
        let payload = PushPayload::new(
            cmd.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            cmd.body.unwrap_or_default(),
        );

        match tokio::time::timeout(self.timeout, transport.send(&cmd.target, &payload)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                tracing::warn!(endpoint = %cmd.target.endpoint, code = %e.code, error = %e.message, "Notification send failed");
                Err(ReminderError::delivery_failed(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(endpoint = %cmd.target.endpoint, "Notification send timed out");
                Err(ReminderError::delivery_failed("timed out"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::push::MockPushTransport;
    use crate::ports::PushError;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn target() -> PushSubscription {
        PushSubscription::new("https://push.example.com/x", BTreeMap::new()).unwrap()
    }

    #[tokio::test]
    async fn defaults_title_and_body() {
        let push = MockPushTransport::new();
        let handler =
            SendNotificationHandler::new(PushSetup::ready(Arc::new(push.clone())), Duration::from_secs(1));

        handler
            .handle(SendNotificationCommand { target: target(), title: None, body: None })
            .await
            .unwrap();

        assert_eq!(push.sent()[0].payload, PushPayload::new("TidySub", ""));
    }

    #[tokio::test]
    async fn delivery_failure_is_reported() {
        let push = MockPushTransport::new();
        push.fail_endpoint("https://push.example.com/x", PushError::endpoint_gone("410"));
        let handler =
            SendNotificationHandler::new(PushSetup::ready(Arc::new(push)), Duration::from_secs(1));

        let err = handler
            .handle(SendNotificationCommand {
                target: target(),
                title: Some("Hi".to_string()),
                body: Some("There".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ReminderError::DeliveryFailed(_)));
    }

    #[tokio::test]
    async fn missing_credentials_fail_fast() {
        let handler = SendNotificationHandler::new(
            PushSetup::missing(["push.vapid_public_key"]),
            Duration::from_secs(1),
        );
        let err = handler
            .handle(SendNotificationCommand { target: target(), title: None, body: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ReminderError::NotConfigured { .. }));
    }
}
