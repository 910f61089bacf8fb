//! Raw subscription records and their normalization.
//!
//! Records arrive from devices and stores in more than one shape: camelCase
//! keys from the app, snake_case keys from the hosted table, sometimes both
//! in one object. Every adapter funnels raw JSON through
//! [`SubscriptionRecord::normalize`] so that only one canonical
//! [`Subscription`] shape exists past the storage boundary.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::domain::billing::{parse_calendar_date, BillingError};
use crate::domain::foundation::{SubscriptionId, ValidationError};
use crate::domain::subscription::{
    BillingInterval, Currency, PushSubscription, ReminderLead, Subscription,
};
use crate::ports::RejectedRecord;

/// Why a raw record could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct RecordError {
    pub id: Option<String>,
    pub error: ValidationError,
}

impl From<RecordError> for RejectedRecord {
    fn from(err: RecordError) -> Self {
        RejectedRecord {
            id: err.id,
            field: err.error.field().to_string(),
            reason: err.error.to_string(),
        }
    }
}

/// A subscription record as stored, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionRecord(Value);

impl SubscriptionRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parses a stored JSON string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Record id as written, if there is one.
    pub fn raw_id(&self) -> Option<String> {
        self.0.as_object().and_then(|obj| id_text(obj.get("id")))
    }

    /// Validates and coerces the record into a [`Subscription`].
    pub fn normalize(&self) -> Result<Subscription, RecordError> {
        let fail = |error: ValidationError| RecordError {
            id: self.raw_id(),
            error,
        };
        let obj = self
            .0
            .as_object()
            .ok_or_else(|| fail(ValidationError::invalid_format("record", "expected a JSON object")))?;
        normalize_object(obj).map_err(fail)
    }
}

impl From<&Subscription> for SubscriptionRecord {
    fn from(subscription: &Subscription) -> Self {
        // Subscription serializes to the canonical camelCase shape.
        Self(serde_json::to_value(subscription).unwrap_or(Value::Null))
    }
}

/// Normalizes a batch, splitting valid subscriptions from rejected records.
pub fn normalize_all<I>(records: I) -> (Vec<Subscription>, Vec<RejectedRecord>)
where
    I: IntoIterator<Item = SubscriptionRecord>,
{
    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    for record in records {
        match record.normalize() {
            Ok(subscription) => valid.push(subscription),
            Err(err) => rejected.push(err.into()),
        }
    }
    (valid, rejected)
}

fn normalize_object(obj: &Map<String, Value>) -> Result<Subscription, ValidationError> {
    let id = id_text(obj.get("id")).ok_or_else(|| ValidationError::empty_field("id"))?;
    let id = SubscriptionId::parse(id)?;

    let name = match obj.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => return Err(ValidationError::empty_field("name")),
    };

    let amount = parse_amount(obj.get("amount"))?;

    let currency = match present(obj.get("currency")) {
        None => Currency::default(),
        Some(Value::String(s)) => s.parse()?,
        Some(_) => {
            return Err(ValidationError::invalid_format("currency", "expected a currency code"))
        }
    };

    let billing_interval = match pick(obj, "billingInterval", "billing_interval") {
        None => BillingInterval::default(),
        Some(Value::String(s)) => s.parse()?,
        Some(_) => {
            return Err(ValidationError::invalid_format(
                "billingInterval",
                "expected Monthly or Yearly",
            ))
        }
    };

    let start_date = match pick(obj, "startDate", "start_date") {
        Some(Value::String(s)) => parse_calendar_date("startDate", s).map_err(date_error)?,
        Some(_) => {
            return Err(ValidationError::invalid_format("startDate", "expected a date string"))
        }
        None => return Err(ValidationError::empty_field("startDate")),
    };

    let mut subscription = Subscription::new(
        id,
        name,
        amount,
        currency,
        billing_interval,
        start_date,
    )?;

    subscription.category = match present(obj.get("category")) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    };
    subscription.is_active = !matches!(pick(obj, "isActive", "is_active"), Some(Value::Bool(false)));
    subscription.trial_period = matches!(
        pick(obj, "trialPeriod", "trial_period"),
        Some(Value::Bool(true))
    );
    // trialEndsOn only matters during a trial; outside one a bad value is ignored.
    subscription.trial_ends_on = match pick(obj, "trialEndsOn", "trial_ends_on") {
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) if subscription.trial_period => {
            Some(parse_calendar_date("trialEndsOn", s).map_err(date_error)?)
        }
        Some(Value::String(s)) => parse_calendar_date("trialEndsOn", s).ok(),
        Some(_) if subscription.trial_period => {
            return Err(ValidationError::invalid_format("trialEndsOn", "expected a date string"))
        }
        Some(_) | None => None,
    };
    subscription.reminder_lead =
        ReminderLead::from_option(pick(obj, "reminderDays", "reminder_days").and_then(lead_days));
    subscription.push_subscription =
        pick(obj, "pushSubscription", "push_subscription").and_then(parse_push);

    Ok(subscription)
}

/// Value under `camel`, falling back to `snake`. Null counts as absent.
fn pick<'a>(obj: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    present(obj.get(camel)).or_else(|| present(obj.get(snake)))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn id_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_amount(value: Option<&Value>) -> Result<Decimal, ValidationError> {
    let text = match present(value) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(ValidationError::invalid_format("amount", "expected a number")),
        None => return Err(ValidationError::empty_field("amount")),
    };
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            ValidationError::invalid_format("amount", format!("'{}' is not a number", text))
        })?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::invalid_format(
            "amount",
            format!("must be positive, got {}", amount),
        ));
    }
    Ok(amount)
}

fn lead_days(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_push(value: &Value) -> Option<PushSubscription> {
    let parsed: PushSubscription = match value {
        Value::String(raw) => serde_json::from_str(raw).ok()?,
        other => serde_json::from_value(other.clone()).ok()?,
    };
    PushSubscription::new(parsed.endpoint, parsed.keys).ok()
}

fn date_error(err: BillingError) -> ValidationError {
    match err {
        BillingError::InvalidDate { field, value } => {
            ValidationError::invalid_format(field, format!("'{}' is not a date", value))
        }
        other => ValidationError::invalid_format("date", other.to_string()),
    }
}
