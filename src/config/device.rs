//! On-device reminder loop configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Run the local reminder loop in this process
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_interval")]
    pub check_interval_secs: u64,

    #[serde(default = "default_true")]
    pub reminders_enabled: bool,

    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

impl DeviceConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.check_interval_secs < 60 {
            return Err(ValidationError::InvalidCheckInterval);
        }
        Ok(())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            check_interval_secs: default_interval(),
            reminders_enabled: true,
            notifications_enabled: true,
        }
    }
}

fn default_interval() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_by_default() {
        let config = DeviceConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.check_interval(), Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_sub_minute_interval() {
        let config = DeviceConfig {
            check_interval_secs: 5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCheckInterval));
    }
}
