//! Reminder delivery error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotConfigured | 500 |
//! | ValidationFailed | 400 |
//! | DeliveryFailed | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that stop a reminder run or an ad hoc send as a whole.
///
/// Failures of individual subscriptions inside a run are counted, not raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// Required credentials are absent. Nothing was processed.
    NotConfigured { missing: Vec<String> },

    /// Request data is unusable.
    ValidationFailed { field: String, message: String },

    /// A single requested delivery failed.
    DeliveryFailed(String),

    /// The subscription store could not be read.
    Infrastructure(String),
}

impl ReminderError {
    pub fn not_configured<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReminderError::NotConfigured {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReminderError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn delivery_failed(message: impl Into<String>) -> Self {
        ReminderError::DeliveryFailed(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReminderError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReminderError::NotConfigured { .. } => ErrorCode::ConfigurationMissing,
            ReminderError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReminderError::DeliveryFailed(_) => ErrorCode::PushDeliveryFailed,
            ReminderError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReminderError::NotConfigured { missing } => {
                format!("Missing configuration: {}", missing.join(", "))
            }
            ReminderError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReminderError::DeliveryFailed(msg) => format!("Failed to send notification: {}", msg),
            ReminderError::Infrastructure(msg) => format!("Failed to load subscriptions: {}", msg),
        }
    }
}

impl std::fmt::Display for ReminderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReminderError {}

impl From<DomainError> for ReminderError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConfigurationMissing => ReminderError::NotConfigured {
                missing: vec![err.message],
            },
            _ => ReminderError::Infrastructure(err.message),
        }
    }
}
