//! Store placeholder for deployments whose store cannot be used.
//!
//! Every call fails with the configured reason. Lets the service start
//! without store credentials and report the problem per request instead.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId};
use crate::domain::subscription::Subscription;
use crate::ports::{SubscriptionBatch, SubscriptionReader, SubscriptionRepository};

#[derive(Debug, Clone)]
pub struct UnavailableStore {
    code: ErrorCode,
    reason: String,
}

impl UnavailableStore {
    /// Store credentials are absent; `missing` names the settings.
    pub fn missing_configuration(missing: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ConfigurationMissing,
            reason: missing.into(),
        }
    }

    /// The backend can be read but not written.
    pub fn read_only(backend: &str) -> Self {
        Self {
            code: ErrorCode::StorageError,
            reason: format!("The {} subscription store is read-only", backend),
        }
    }

    fn error(&self) -> DomainError {
        DomainError::new(self.code, self.reason.clone())
    }
}

#[async_trait]
impl SubscriptionReader for UnavailableStore {
    async fn fetch_all(&self) -> Result<SubscriptionBatch, DomainError> {
        Err(self.error())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Err(self.error())
    }
}

#[async_trait]
impl SubscriptionRepository for UnavailableStore {
    async fn replace_all(&self, _subscriptions: &[Subscription]) -> Result<usize, DomainError> {
        Err(self.error())
    }

    async fn upsert(&self, _subscription: &Subscription) -> Result<(), DomainError> {
        Err(self.error())
    }

    async fn delete(&self, _id: &SubscriptionId) -> Result<bool, DomainError> {
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_configuration_reports_setting() {
        let store = UnavailableStore::missing_configuration("store.redis_url");
        let err = store.fetch_all().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigurationMissing);
        assert_eq!(err.message, "store.redis_url");
    }

    #[tokio::test]
    async fn read_only_rejects_writes() {
        let store = UnavailableStore::read_only("postgres");
        let err = store.replace_all(&[]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(err.message.contains("read-only"));
    }
}
