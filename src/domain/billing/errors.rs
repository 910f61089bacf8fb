//! Billing calculation errors.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while parsing billing dates or advancing them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("Field '{field}' is not a valid date: '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("Advancing {anchor} by {months} months leaves the supported date range")]
    OutOfRange { anchor: NaiveDate, months: u64 },
}

impl BillingError {
    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        BillingError::InvalidDate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<BillingError> for DomainError {
    fn from(err: BillingError) -> Self {
        match &err {
            BillingError::InvalidDate { field, .. } => {
                DomainError::new(ErrorCode::InvalidDate, err.to_string())
                    .with_detail("field", field.clone())
            }
            BillingError::OutOfRange { .. } => {
                DomainError::new(ErrorCode::OutOfRange, err.to_string())
            }
        }
    }
}
