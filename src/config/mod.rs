//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `TIDYSUB` prefix and `__`
//! between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use tidysub::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```
//!
//! Every section has defaults, so an empty environment yields a working
//! in-memory service. Missing push, store or cron credentials are not startup
//! errors; the runs that need them fail instead.

mod cron;
mod device;
mod error;
mod push;
mod server;
mod store;

pub use cron::CronConfig;
pub use device::DeviceConfig;
pub use error::{ConfigError, ValidationError};
pub use push::PushConfig;
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Scheduled sweep trigger
    #[serde(default)]
    pub cron: CronConfig,

    /// VAPID credentials and Web Push delivery settings
    #[serde(default)]
    pub push: PushConfig,

    /// Subscription store backend
    #[serde(default)]
    pub store: StoreConfig,

    /// In-process device reminder loop
    #[serde(default)]
    pub device: DeviceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `TIDYSUB__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TIDYSUB__PUSH__VAPID_SUBJECT=...` -> `push.vapid_subject = ...`
    ///
    /// A `.env` file is read first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TIDYSUB")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Static checks only: ports, timeouts, timezone, concurrency, URL schemes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.cron.validate()?;
        self.push.validate()?;
        self.store.validate()?;
        if self.device.enabled {
            self.device.validate()?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
