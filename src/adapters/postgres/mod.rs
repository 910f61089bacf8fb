//! PostgreSQL adapters.
//!
//! - `PostgresSubscriptionReader` - Read-only access to the hosted subscriptions table

mod subscription_reader;

pub use subscription_reader::PostgresSubscriptionReader;
