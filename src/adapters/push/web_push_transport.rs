//! Web Push protocol adapter.
//!
//! Implements the `PushTransport` port with the `web-push` crate: the payload
//! is encrypted with the subscription's `p256dh`/`auth` keys (aes128gcm), the
//! request is signed with the server's VAPID key, and the message is posted
//! straight to the browser's push service endpoint.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use web_push::{
    ContentEncoding, HyperWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushError, WebPushMessage, WebPushMessageBuilder,
};

use crate::domain::reminder::PushPayload;
use crate::domain::subscription::PushSubscription;
use crate::ports::{PushError, PushTransport};

/// VAPID key pair and contact subject.
///
/// `private_key` is the raw P-256 scalar, base64url encoded, as produced by
/// the usual `web-push generate-vapid-keys` tooling.
#[derive(Clone)]
pub struct VapidCredentials {
    pub subject: String,
    pub public_key: String,
    pub private_key: SecretString,
}

impl std::fmt::Debug for VapidCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapidCredentials")
            .field("subject", &self.subject)
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Web Push transport configuration.
#[derive(Debug, Clone)]
pub struct WebPushConfig {
    pub vapid: VapidCredentials,
    /// How long the push service keeps an undelivered message.
    pub ttl_secs: u32,
}

/// Standard Web Push client.
pub struct WebPushTransport {
    config: WebPushConfig,
    client: HyperWebPushClient,
}

impl WebPushTransport {
    /// Builds the transport, rejecting a VAPID private key that does not parse.
    pub fn new(config: WebPushConfig) -> Result<Self, PushError> {
        VapidSignatureBuilder::from_base64_no_sub(config.vapid.private_key.expose_secret(), web_push::URL_SAFE_NO_PAD)
            .map_err(|e| PushError::misconfigured(format!("Invalid VAPID private key: {}", e)))?;
        Ok(Self {
            config,
            client: HyperWebPushClient::new(),
        })
    }

    fn build_message(
        &self,
        target: &PushSubscription,
        payload: &PushPayload,
    ) -> Result<WebPushMessage, PushError> {
        let (Some(p256dh), Some(auth)) = (target.key("p256dh"), target.key("auth")) else {
            return Err(PushError::rejected(
                "Push subscription is missing its p256dh or auth key",
            ));
        };
        let info = SubscriptionInfo::new(target.endpoint.as_str(), p256dh, auth);

        let mut signature =
            VapidSignatureBuilder::from_base64(
                self.config.vapid.private_key.expose_secret(),
                web_push::URL_SAFE_NO_PAD,
                &info,
            )
                .map_err(push_error)?;
        signature.add_claim("sub", self.config.vapid.subject.as_str());
        let signature = signature.build().map_err(push_error)?;

        let content = serde_json::to_vec(payload)
            .map_err(|e| PushError::rejected(format!("Failed to encode payload: {}", e)))?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_payload(ContentEncoding::Aes128Gcm, &content);
        builder.set_ttl(self.config.ttl_secs);
        builder.set_vapid_signature(signature);
        builder.build().map_err(push_error)
    }
}

/// Maps the push service's answer onto the port's error categories.
fn push_error(err: WebPushError) -> PushError {
    match &err {
        WebPushError::EndpointNotValid { .. } => {
            PushError::endpoint_gone(err.to_string()).with_status(410)
        }
        WebPushError::EndpointNotFound { .. } => {
            PushError::endpoint_gone(err.to_string()).with_status(404)
        }
        WebPushError::Unauthorized { .. } => PushError::misconfigured(err.to_string()).with_status(401),
        WebPushError::PayloadTooLarge { .. } => PushError::rejected(err.to_string()).with_status(413),
        WebPushError::Unspecified { .. } => PushError::network(err.to_string()),
        _ => PushError::rejected(err.to_string()),
    }
}

#[async_trait]
impl PushTransport for WebPushTransport {
    async fn send(
        &self,
        target: &PushSubscription,
        payload: &PushPayload,
    ) -> Result<(), PushError> {
        let message = self.build_message(target, payload)?;

        match self.client.send(message).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let err = push_error(e);
                if err.code == crate::ports::PushErrorCode::EndpointGone {
                    tracing::info!(endpoint = %target.endpoint, status = ?err.status, "Push endpoint gone");
                } else {
                    tracing::error!(endpoint = %target.endpoint, error = %err, "Push service rejected message");
                }
                Err(err)
            }
        }
    }
}
