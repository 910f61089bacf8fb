//! Notification ledger adapters.

mod in_memory;
mod redis;

pub use self::redis::RedisNotificationLedger;
pub use in_memory::InMemoryNotificationLedger;
