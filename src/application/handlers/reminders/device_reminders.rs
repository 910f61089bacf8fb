//! CheckDeviceRemindersHandler - On-device reminder check.
//!
//! Same evaluation as the server sweep, delivered through the device's own
//! notification center. Runs when the app becomes active and then on a timer.
//! Never surfaces errors to the user: every failure is logged and counted.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::SubscriptionId;
use crate::domain::reminder::{assess, DeliveryTarget, ReminderOutcome, SkipReason};
use crate::ports::{LocalNotifier, NotificationPermission, SubscriptionReader};

/// App settings that gate on-device reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSettings {
    pub reminders_enabled: bool,
    pub notifications_enabled: bool,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            reminders_enabled: true,
            notifications_enabled: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckDeviceRemindersCommand {
    pub today: NaiveDate,
    pub settings: DeviceSettings,
}

/// What one device check did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceCheckReport {
    /// The check did not run: settings off or permission not granted.
    pub suppressed: bool,
    pub shown: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub failed: usize,
    /// Skips caused by a due date computed in the past.
    pub defects: usize,
}

impl DeviceCheckReport {
    fn suppressed() -> Self {
        Self {
            suppressed: true,
            ..Self::default()
        }
    }

    fn record_skip(&mut self, id: &SubscriptionId, reason: SkipReason, today: NaiveDate) {
        if let SkipReason::DueDateInPast { due_date } = reason {
            tracing::error!(subscription_id = %id, %due_date, %today, "Next due date is in the past");
            self.defects += 1;
        }
        self.skipped += 1;
    }
}

pub struct CheckDeviceRemindersHandler {
    reader: Arc<dyn SubscriptionReader>,
    notifier: Arc<dyn LocalNotifier>,
}

impl CheckDeviceRemindersHandler {
    pub fn new(reader: Arc<dyn SubscriptionReader>, notifier: Arc<dyn LocalNotifier>) -> Self {
        Self { reader, notifier }
    }

    pub async fn handle(&self, cmd: CheckDeviceRemindersCommand) -> DeviceCheckReport {
        if !cmd.settings.reminders_enabled || !cmd.settings.notifications_enabled {
            tracing::debug!(settings = ?cmd.settings, "Device reminders disabled in settings");
            return DeviceCheckReport::suppressed();
        }

        let permission = self.notifier.permission().await;
        if permission != NotificationPermission::Granted {
            tracing::debug!(?permission, "Notification permission not granted");
            return DeviceCheckReport::suppressed();
        }

        let batch = match self.reader.fetch_all().await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(error = %e, "Device reminder check could not load subscriptions");
                return DeviceCheckReport::default();
            }
        };

        let mut report = DeviceCheckReport {
            rejected: batch.rejected.len(),
            ..DeviceCheckReport::default()
        };

        for subscription in &batch.valid {
            let event = match assess(subscription, cmd.today, DeliveryTarget::Device) {
                Ok(ReminderOutcome::Fire(event)) => event,
                Ok(ReminderOutcome::Skip(reason)) => {
                    report.record_skip(&subscription.id, reason, cmd.today);
                    continue;
                }
                Err(e) => {
                    tracing::warn!(subscription_id = %subscription.id, error = %e, "Skipping subscription");
                    report.rejected += 1;
                    continue;
                }
            };

            match self.notifier.show(&event.title, &event.body, &event.tag()).await {
                Ok(()) => report.shown += 1,
                Err(e) => {
                    tracing::warn!(subscription_id = %subscription.id, error = %e, "Failed to show reminder");
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(shown = report.shown, skipped = report.skipped, "Device reminder check complete");
        report
    }
}
