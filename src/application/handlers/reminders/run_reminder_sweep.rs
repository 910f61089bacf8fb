//! RunReminderSweepHandler - Server-side reminder sweep.
//!
//! Loads every stored subscription, evaluates each one for push delivery and
//! sends the reminders that fall due today. Triggered by the cron endpoint.
//!
//! One subscription's failure never stops the others: malformed records,
//! calculation errors, gone endpoints and timeouts are logged and counted.
//! Nothing is retried within a run.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::domain::reminder::{
    assess, DeliveryTarget, ReminderError, ReminderEvent, ReminderOutcome, SkipReason,
};
use crate::domain::subscription::PushSubscription;
use crate::ports::{NotificationLedger, SubscriptionReader};

use super::PushSetup;

/// Command to run one sweep.
#[derive(Debug, Clone)]
pub struct RunReminderSweepCommand {
    /// "Today" in the configured timezone, computed once for the whole run.
    pub today: NaiveDate,
}

/// Counts for one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Valid subscriptions looked at.
    pub evaluated: usize,
    /// Records that failed normalization or date arithmetic.
    pub rejected: usize,
    /// Inactive, reminders off, no endpoint, or not due today.
    pub skipped: usize,
    /// Already notified today.
    pub deduplicated: usize,
    pub notified: usize,
    pub failed: usize,
}

/// Sweep tuning.
#[derive(Debug, Clone, Copy)]
pub struct SweepSettings {
    pub delivery_timeout: Duration,
    pub max_concurrency: usize,
    pub dedupe_same_day: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            delivery_timeout: Duration::from_secs(10),
            max_concurrency: 8,
            dedupe_same_day: true,
        }
    }
}

/// Handler for the server reminder sweep.
pub struct RunReminderSweepHandler {
    reader: Arc<dyn SubscriptionReader>,
    push: PushSetup,
    ledger: Option<Arc<dyn NotificationLedger>>,
    settings: SweepSettings,
}

impl RunReminderSweepHandler {
    pub fn new(
        reader: Arc<dyn SubscriptionReader>,
        push: PushSetup,
        settings: SweepSettings,
    ) -> Self {
        Self {
            reader,
            push,
            ledger: None,
            settings,
        }
    }

    /// Records successful deliveries, and suppresses repeats on the same day
    /// when `dedupe_same_day` is set.
    pub fn with_ledger(mut self, ledger: Arc<dyn NotificationLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub async fn handle(&self, cmd: RunReminderSweepCommand) -> Result<SweepReport, ReminderError> {
        // Configuration problems abort before any data is read.
        let transport = self.push.transport()?;
        let today = cmd.today;

        let batch = self.reader.fetch_all().await?;

        let mut report = SweepReport {
            rejected: batch.rejected.len(),
            ..SweepReport::default()
        };
        for rejected in &batch.rejected {
            tracing::warn!(
                subscription_id = rejected.id.as_deref().unwrap_or("<none>"),
                field = %rejected.field,
                reason = %rejected.reason,
                "Skipping malformed subscription record"
            );
        }

        let mut due: Vec<(ReminderEvent, PushSubscription)> = Vec::new();
        for subscription in &batch.valid {
            report.evaluated += 1;
            match assess(subscription, today, DeliveryTarget::Push) {
                Ok(ReminderOutcome::Fire(event)) => {
                    if let Some(target) = subscription.push_subscription.clone() {
                        due.push((event, target));
                    }
                }
                Ok(ReminderOutcome::Skip(SkipReason::DueDateInPast { due_date })) => {
                    tracing::error!(
                        subscription_id = %subscription.id,
                        %due_date,
                        %today,
                        "Next due date is in the past"
                    );
                    report.skipped += 1;
                }
                Ok(ReminderOutcome::Skip(reason)) => {
                    tracing::debug!(subscription_id = %subscription.id, ?reason, "No reminder today");
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(subscription_id = %subscription.id, error = %e, "Skipping subscription");
                    report.rejected += 1;
                }
            }
        }

        let due = self.drop_already_notified(due, today, &mut report).await;

        let timeout = self.settings.delivery_timeout;
        let results: Vec<_> = stream::iter(due)
            .map(|(event, target)| async move {
                let outcome =
                    tokio::time::timeout(timeout, transport.send(&target, &event.payload())).await;
                (event, outcome)
            })
            .buffer_unordered(self.settings.max_concurrency.max(1))
            .collect()
            .await;

        for (event, outcome) in results {
            match outcome {
                Ok(Ok(())) => {
                    report.notified += 1;
                    tracing::info!(subscription_id = %event.subscription_id, due_in_days = event.due_in_days, "Reminder sent");
                    self.record_delivery(&event, today).await;
                }
                Ok(Err(e)) => {
                    report.failed += 1;
                    tracing::warn!(subscription_id = %event.subscription_id, code = %e.code, error = %e.message, "Reminder delivery failed");
                }
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(subscription_id = %event.subscription_id, timeout_secs = timeout.as_secs(), "Reminder delivery timed out");
                }
            }
        }

        tracing::info!(
            evaluated = report.evaluated,
            rejected = report.rejected,
            skipped = report.skipped,
            deduplicated = report.deduplicated,
            notified = report.notified,
            failed = report.failed,
            %today,
            "Reminder sweep complete"
        );
        Ok(report)
    }

    async fn drop_already_notified(
        &self,
        due: Vec<(ReminderEvent, PushSubscription)>,
        today: NaiveDate,
        report: &mut SweepReport,
    ) -> Vec<(ReminderEvent, PushSubscription)> {
        let ledger = match (&self.ledger, self.settings.dedupe_same_day) {
            (Some(ledger), true) => ledger,
            _ => return due,
        };

        let mut kept = Vec::with_capacity(due.len());
        for (event, target) in due {
            match ledger.last_notified(&event.subscription_id).await {
                Ok(Some(day)) if day == today => {
                    tracing::debug!(subscription_id = %event.subscription_id, "Already notified today");
                    report.deduplicated += 1;
                }
                Ok(_) => kept.push((event, target)),
                Err(e) => {
                    // Ledger errors never block delivery.
                    tracing::warn!(subscription_id = %event.subscription_id, error = %e, "Notification ledger unavailable");
                    kept.push((event, target));
                }
            }
        }
        kept
    }

    async fn record_delivery(&self, event: &ReminderEvent, today: NaiveDate) {
        if let Some(ledger) = &self.ledger {
            if let Err(e) = ledger.mark_notified(&event.subscription_id, today).await {
                tracing::warn!(subscription_id = %event.subscription_id, error = %e, "Failed to record notification");
            }
        }
    }
}
