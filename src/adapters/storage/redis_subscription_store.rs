//! Redis-backed Subscription Store
//!
//! One hash (default key `subscriptions`) maps subscription id to the JSON
//! record. Suitable for multi-server deployments sharing one list.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::domain::subscription::Subscription;
use crate::ports::{
    RejectedRecord, SubscriptionBatch, SubscriptionReader, SubscriptionRepository,
};

use super::record::{normalize_all, SubscriptionRecord};

/// Redis hash of subscription records keyed by id.
#[derive(Clone)]
pub struct RedisSubscriptionStore {
    conn: MultiplexedConnection,
    key: String,
}

impl RedisSubscriptionStore {
    pub fn new(conn: MultiplexedConnection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, key: impl Into<String>) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(redis_error)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(redis_error)?;
        Ok(Self::new(conn, key))
    }

    async fn entries(&self) -> Result<Vec<(String, String)>, DomainError> {
        let mut conn = self.conn.clone();
        let map: HashMap<String, String> = conn.hgetall(&self.key).await.map_err(redis_error)?;
        let mut entries: Vec<(String, String)> = map.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}

fn redis_error(err: redis::RedisError) -> DomainError {
    DomainError::storage(format!("Redis error: {}", err)).with_detail("backend", "redis")
}

fn to_json(subscription: &Subscription) -> Result<String, DomainError> {
    serde_json::to_string(&SubscriptionRecord::from(subscription).into_value())
        .map_err(|e| DomainError::storage(format!("Failed to serialize subscription: {}", e)))
}

/// Parses hash entries into records. The hash field stands in for a record
/// that carries no id of its own.
fn records_from_hash(
    entries: Vec<(String, String)>,
) -> (Vec<SubscriptionRecord>, Vec<RejectedRecord>) {
    let mut records = Vec::with_capacity(entries.len());
    let mut unparseable = Vec::new();
    for (field, raw) in entries {
        match SubscriptionRecord::from_json(&raw) {
            Ok(record) => {
                let mut value = record.into_value();
                if let Value::Object(obj) = &mut value {
                    if obj.get("id").map_or(true, Value::is_null) {
                        obj.insert("id".to_string(), Value::String(field));
                    }
                }
                records.push(SubscriptionRecord::new(value));
            }
            Err(e) => unparseable.push(RejectedRecord {
                id: Some(field),
                field: "record".to_string(),
                reason: format!("Stored value is not JSON: {}", e),
            }),
        }
    }
    (records, unparseable)
}

#[async_trait]
impl SubscriptionReader for RedisSubscriptionStore {
    async fn fetch_all(&self) -> Result<SubscriptionBatch, DomainError> {
        let (records, mut rejected) = records_from_hash(self.entries().await?);
        let (valid, invalid) = normalize_all(records);
        rejected.extend(invalid);
        Ok(SubscriptionBatch { valid, rejected })
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let mut conn = self.conn.clone();
        conn.hlen(&self.key).await.map_err(redis_error)
    }
}

#[async_trait]
impl SubscriptionRepository for RedisSubscriptionStore {
    async fn replace_all(&self, subscriptions: &[Subscription]) -> Result<usize, DomainError> {
        let items = subscriptions
            .iter()
            .map(|s| Ok((s.id.to_string(), to_json(s)?)))
            .collect::<Result<Vec<(String, String)>, DomainError>>()?;

        let mut pipe = redis::pipe();
        pipe.atomic().del(&self.key).ignore();
        if !items.is_empty() {
            pipe.hset_multiple(&self.key, items.as_slice()).ignore();
        }
        let mut conn = self.conn.clone();
        pipe.query_async::<_, ()>(&mut conn)
            .await
            .map_err(redis_error)?;
        Ok(items.len())
    }

    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let json = to_json(subscription)?;
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(&self.key, subscription.id.as_str(), json)
            .await
            .map_err(redis_error)
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<bool, DomainError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn
            .hdel(&self.key, id.as_str())
            .await
            .map_err(redis_error)?;
        Ok(removed > 0)
    }
}
