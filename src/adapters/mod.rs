//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Subscription stores (memory, JSON file, Redis) and record normalization
//! - `postgres` - Read-only hosted subscriptions table
//! - `push` - Web Push protocol client and recording mock
//! - `notifier` - On-device notification sinks
//! - `ledger` - Last-notified dates (memory, Redis)
//! - `clock` - System and fixed clocks
//! - `http` - REST API

pub mod clock;
pub mod http;
pub mod ledger;
pub mod notifier;
pub mod postgres;
pub mod push;
pub mod storage;
