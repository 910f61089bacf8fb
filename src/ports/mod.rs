//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `SubscriptionReader` - Load and normalize stored subscriptions
//! - `SubscriptionRepository` - Replace, upsert and delete stored subscriptions
//! - `NotificationLedger` - Last-notified date per subscription
//!
//! ## Delivery Ports
//!
//! - `PushTransport` - Web push delivery
//! - `LocalNotifier` - On-device notifications
//!
//! ## Time
//!
//! - `Clock` - Today's date in the configured timezone

mod clock;
mod local_notifier;
mod notification_ledger;
mod push_transport;
mod subscription_reader;
mod subscription_repository;

pub use clock::Clock;
pub use local_notifier::{LocalNotifier, NotificationPermission, NotifierError};
pub use notification_ledger::NotificationLedger;
pub use push_transport::{PushError, PushErrorCode, PushTransport};
pub use subscription_reader::{RejectedRecord, SubscriptionBatch, SubscriptionReader};
pub use subscription_repository::SubscriptionRepository;
