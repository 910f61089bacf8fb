//! Storage Adapters
//!
//! Implementations of the subscription store ports.
//!
//! ## Available Adapters
//!
//! - **InMemorySubscriptionStore** - Process-scoped list (testing/development)
//! - **FileSubscriptionStore** - JSON array on disk
//! - **RedisSubscriptionStore** - Redis hash keyed by subscription id
//! - **UnavailableStore** - Fails every call (missing credentials, read-only backends)
//!
//! The read-only PostgreSQL reader lives in `adapters::postgres`.
//!
//! All of them store raw records and normalize through [`SubscriptionRecord`].

mod file_subscription_store;
mod in_memory_subscription_store;
mod record;
mod redis_subscription_store;
mod unavailable_store;

pub use file_subscription_store::FileSubscriptionStore;
pub use in_memory_subscription_store::InMemorySubscriptionStore;
pub use record::{normalize_all, RecordError, SubscriptionRecord};
pub use redis_subscription_store::RedisSubscriptionStore;
pub use unavailable_store::UnavailableStore;
