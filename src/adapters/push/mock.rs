//! Mock push transport for testing.
//!
//! Records every delivery and lets tests inject per-endpoint failures or a
//! delivery delay (to exercise timeouts).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::reminder::PushPayload;
use crate::domain::subscription::PushSubscription;
use crate::ports::{PushError, PushTransport};

/// A delivered push message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentPush {
    pub endpoint: String,
    pub payload: PushPayload,
}

#[derive(Default)]
struct MockState {
    sent: Vec<SentPush>,
    failures: HashMap<String, PushError>,
    delays: HashMap<String, Duration>,
}

/// Recording push transport.
#[derive(Clone, Default)]
pub struct MockPushTransport {
    inner: Arc<Mutex<MockState>>,
}

impl MockPushTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send to `endpoint` fails with `error`.
    pub fn fail_endpoint(&self, endpoint: impl Into<String>, error: PushError) {
        self.inner
            .lock()
            .unwrap()
            .failures
            .insert(endpoint.into(), error);
    }

    /// Sends to `endpoint` take `delay` before completing.
    pub fn delay_endpoint(&self, endpoint: impl Into<String>, delay: Duration) {
        self.inner
            .lock()
            .unwrap()
            .delays
            .insert(endpoint.into(), delay);
    }

    pub fn sent(&self) -> Vec<SentPush> {
        self.inner.lock().unwrap().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.inner.lock().unwrap().sent.len()
    }
}

#[async_trait]
impl PushTransport for MockPushTransport {
    async fn send(
        &self,
        target: &PushSubscription,
        payload: &PushPayload,
    ) -> Result<(), PushError> {
        let delay = self.inner.lock().unwrap().delays.get(&target.endpoint).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.inner.lock().unwrap();
        if let Some(error) = state.failures.get(&target.endpoint) {
            return Err(error.clone());
        }
        state.sent.push(SentPush {
            endpoint: target.endpoint.clone(),
            payload: payload.clone(),
        });
        Ok(())
    }
}
