//! Push delivery adapters.
//!
//! - `WebPushTransport` - Web Push protocol client (production)
//! - `MockPushTransport` - Recording transport for tests

mod mock;
mod web_push_transport;

pub use mock::{MockPushTransport, SentPush};
pub use web_push_transport::{VapidCredentials, WebPushConfig, WebPushTransport};
