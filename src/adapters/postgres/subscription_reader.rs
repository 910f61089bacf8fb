//! PostgreSQL implementation of SubscriptionReader.
//!
//! Reads the hosted `subscriptions` table. Rows are converted to JSON with
//! `to_jsonb` and normalized like any other record, so column spelling
//! (snake_case) and loosely typed columns are handled in one place.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::adapters::storage::{normalize_all, SubscriptionRecord};
use crate::domain::foundation::DomainError;
use crate::ports::{SubscriptionBatch, SubscriptionReader};

/// PostgreSQL implementation of the SubscriptionReader port.
///
/// Read-only: the table is owned by the hosted app.
pub struct PostgresSubscriptionReader {
    pool: PgPool,
}

impl PostgresSubscriptionReader {
    /// Creates a new PostgresSubscriptionReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects lazily; the first query opens the connection.
    pub fn connect_lazy(url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(url)
            .map_err(|e| {
                DomainError::storage(format!("Invalid database URL: {}", e))
                    .with_detail("backend", "postgres")
            })?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl SubscriptionReader for PostgresSubscriptionReader {
    async fn fetch_all(&self) -> Result<SubscriptionBatch, DomainError> {
        let rows: Vec<Value> = sqlx::query_scalar(
            r#"
            SELECT to_jsonb(s) AS record
            FROM subscriptions s
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::storage(format!("Failed to load subscriptions: {}", e))
                .with_detail("backend", "postgres")
        })?;

        let (valid, rejected) = normalize_all(rows.into_iter().map(SubscriptionRecord::new));
        Ok(SubscriptionBatch { valid, rejected })
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to count subscriptions: {}", e))
                    .with_detail("backend", "postgres")
            })?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
