//! Subscription store configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which store backs the service.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
    Redis,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// JSON file path (`file` backend)
    pub file_path: Option<String>,

    /// Redis connection URL (`redis` backend, also used by the notification ledger)
    pub redis_url: Option<String>,

    /// Redis hash holding the records
    #[serde(default = "default_redis_key")]
    pub redis_key: String,

    /// PostgreSQL connection URL (`postgres` backend)
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl StoreConfig {
    /// Setting the chosen backend needs but does not have.
    pub fn missing_credential(&self) -> Option<&'static str> {
        let (value, name) = match self.backend {
            StoreBackend::Memory => return None,
            StoreBackend::File => (&self.file_path, "store.file_path"),
            StoreBackend::Redis => (&self.redis_url, "store.redis_url"),
            StoreBackend::Postgres => (&self.database_url, "store.database_url"),
        };
        match value.as_deref() {
            Some(v) if !v.trim().is_empty() => None,
            _ => Some(name),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.redis_url.as_deref().filter(|u| !u.is_empty()) {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        if let Some(url) = self.database_url.as_deref().filter(|u| !u.is_empty()) {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ValidationError::InvalidDatabaseUrl);
            }
        }
        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            file_path: None,
            redis_url: None,
            redis_key: default_redis_key(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_redis_key() -> String {
    "subscriptions".to_string()
}

fn default_max_connections() -> u32 {
    5
}
