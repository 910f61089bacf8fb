//! Push transport port for web push delivery.
//!
//! Payload encryption and VAPID signing belong to the implementation. The
//! caller hands over the browser's push subscription and a plain
//! `{ title, body }` payload.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::reminder::PushPayload;
use crate::domain::subscription::PushSubscription;

/// Port for delivering one web push message.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Delivers `payload` to `target`. One attempt, no retries.
    async fn send(&self, target: &PushSubscription, payload: &PushPayload)
        -> Result<(), PushError>;
}

/// Push delivery error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct PushError {
    pub code: PushErrorCode,
    pub message: String,
    /// HTTP status reported by the push service, if any.
    pub status: Option<u16>,
}

impl PushError {
    pub fn new(code: PushErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// The browser unsubscribed; the endpoint will never accept messages again.
    pub fn endpoint_gone(message: impl Into<String>) -> Self {
        Self::new(PushErrorCode::EndpointGone, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PushErrorCode::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PushErrorCode::Timeout, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(PushErrorCode::Rejected, message)
    }

    pub fn misconfigured(message: impl Into<String>) -> Self {
        Self::new(PushErrorCode::Misconfigured, message)
    }
}

/// Push error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushErrorCode {
    EndpointGone,
    Network,
    Timeout,
    Rejected,
    Misconfigured,
}

impl std::fmt::Display for PushErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PushErrorCode::EndpointGone => "endpoint_gone",
            PushErrorCode::Network => "network_error",
            PushErrorCode::Timeout => "timeout",
            PushErrorCode::Rejected => "rejected",
            PushErrorCode::Misconfigured => "misconfigured",
        };
        write!(f, "{}", s)
    }
}

impl From<PushError> for DomainError {
    fn from(err: PushError) -> Self {
        let code = match err.code {
            PushErrorCode::Misconfigured => ErrorCode::ConfigurationMissing,
            _ => ErrorCode::PushDeliveryFailed,
        };
        DomainError::new(code, err.message).with_detail("push_error", err.code.to_string())
    }
}
