//! Redis-backed notification ledger.
//!
//! One string key per subscription holding the last notified date, expiring
//! after a few days. Shared by every server so two instances triggered on the
//! same day do not both notify.

use async_trait::async_trait;
use chrono::NaiveDate;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId};
use crate::ports::NotificationLedger;

/// Entries outlive the day they were written by a safe margin.
const ENTRY_TTL_SECS: u64 = 3 * 24 * 60 * 60;

#[derive(Clone)]
pub struct RedisNotificationLedger {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisNotificationLedger {
    pub fn new(conn: MultiplexedConnection, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, id: &SubscriptionId) -> String {
        format!("{}:{}", self.prefix, id)
    }
}

fn cache_error(err: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::CacheError, format!("Redis error: {}", err))
}

#[async_trait]
impl NotificationLedger for RedisNotificationLedger {
    async fn last_notified(&self, id: &SubscriptionId) -> Result<Option<NaiveDate>, DomainError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.key(id)).await.map_err(cache_error)?;
        Ok(value.and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok()))
    }

    async fn mark_notified(&self, id: &SubscriptionId, on: NaiveDate) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(self.key(id), on.format("%Y-%m-%d").to_string(), ENTRY_TTL_SECS)
            .await
            .map_err(cache_error)
    }
}

