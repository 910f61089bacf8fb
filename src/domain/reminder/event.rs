//! Reminder events and the notification text they carry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SubscriptionId;

/// Default notification title used for ad hoc sends.
pub const DEFAULT_TITLE: &str = "TidySub";

/// Notification body pushed to the browser, `{ "title", "body" }` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
}

impl PushPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A reminder that should be delivered today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEvent {
    pub subscription_id: SubscriptionId,
    pub title: String,
    pub body: String,
    pub due_date: NaiveDate,
    pub due_in_days: i64,
}

impl ReminderEvent {
    pub fn payload(&self) -> PushPayload {
        PushPayload::new(self.title.clone(), self.body.clone())
    }

    /// Tag for on-device notifications. Showing a second notification with the
    /// same tag replaces the first.
    pub fn tag(&self) -> String {
        format!("reminder-{}", self.subscription_id)
    }
}

/// Title and body for a payment due in `due_in_days`, or `None` if the date is
/// already past.
pub fn reminder_message(name: &str, due_in_days: i64) -> Option<(String, String)> {
    match due_in_days {
        d if d < 0 => None,
        0 => Some((
            "Payment Due Today".to_string(),
            format!("Your {} subscription is due today!", name),
        )),
        1 => Some((
            "Payment Due Tomorrow".to_string(),
            format!("Your {} subscription is due tomorrow!", name),
        )),
        d => Some((
            "Upcoming Payment".to_string(),
            format!("Your {} subscription is due in {} days.", name, d),
        )),
    }
}
