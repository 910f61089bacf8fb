//! Cron trigger configuration

use chrono_tz::Tz;
use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Scheduled reminder sweep settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CronConfig {
    /// Bearer secret the scheduler presents. The trigger refuses to run without it.
    pub secret: Option<SecretString>,

    /// IANA timezone that defines "today"
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Skip subscriptions already notified today
    #[serde(default = "default_true")]
    pub dedupe_same_day: bool,
}

impl CronConfig {
    pub fn tz(&self) -> Result<Tz, ValidationError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ValidationError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tz().map(|_| ())
    }
}

impl Default for CronConfig {
    fn default() -> Self {
        Self {
            secret: None,
            timezone: default_timezone(),
            dedupe_same_day: true,
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_utc_with_dedupe() {
        let config = CronConfig::default();
        assert_eq!(config.tz().unwrap(), chrono_tz::UTC);
        assert!(config.dedupe_same_day);
        assert!(config.secret.is_none());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let config = CronConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::UnknownTimezone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn accepts_named_zone() {
        let config = CronConfig {
            timezone: "America/New_York".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
