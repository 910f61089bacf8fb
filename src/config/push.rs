//! Web push configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// VAPID credentials and Web Push delivery settings.
///
/// Credentials are optional here; an incomplete set only fails the runs that
/// need to deliver.
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    pub vapid_subject: Option<String>,
    pub vapid_public_key: Option<String>,
    pub vapid_private_key: Option<SecretString>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default = "default_ttl")]
    pub ttl_secs: u32,
}

impl PushConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Setting names that must be filled in before push delivery works.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.vapid_subject.as_deref()) {
            missing.push("push.vapid_subject");
        }
        if is_blank(self.vapid_public_key.as_deref()) {
            missing.push("push.vapid_public_key");
        }
        if self.vapid_private_key.is_none() {
            missing.push("push.vapid_private_key");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidPushTimeout);
        }
        if self.max_concurrency == 0 || self.max_concurrency > 64 {
            return Err(ValidationError::InvalidConcurrency);
        }
        Ok(())
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            vapid_subject: None,
            vapid_public_key: None,
            vapid_private_key: None,
            timeout_secs: default_timeout(),
            max_concurrency: default_max_concurrency(),
            ttl_secs: default_ttl(),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn default_timeout() -> u64 {
    10
}

fn default_max_concurrency() -> usize {
    8
}

fn default_ttl() -> u32 {
    86_400
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PushConfig {
        PushConfig {
            vapid_subject: Some("mailto:ops@tidysub.app".to_string()),
            vapid_public_key: Some("BPub".to_string()),
            vapid_private_key: Some(SecretString::new("priv".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn complete_credentials_have_nothing_missing() {
        assert!(complete().missing_credentials().is_empty());
    }

    #[test]
    fn lists_every_missing_credential() {
        assert_eq!(
            PushConfig::default().missing_credentials(),
            vec![
                "push.vapid_subject",
                "push.vapid_public_key",
                "push.vapid_private_key"
            ]
        );
    }

    #[test]
    fn blank_subject_counts_as_missing() {
        let config = PushConfig {
            vapid_subject: Some("  ".to_string()),
            ..complete()
        };
        assert_eq!(config.missing_credentials(), vec!["push.vapid_subject"]);
    }

    #[test]
    fn rejects_out_of_range_timeout() {
        let config = PushConfig {
            timeout_secs: 0,
            ..complete()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPushTimeout));
    }

    #[test]
    fn rejects_zero_concurrency() {
        let config = PushConfig {
            max_concurrency: 0,
            ..complete()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidConcurrency));
    }
}
