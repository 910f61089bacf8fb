//! Periodic device reminder loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ports::Clock;

use super::{CheckDeviceRemindersCommand, CheckDeviceRemindersHandler, DeviceSettings};

/// Spawns the device reminder loop.
///
/// The first check runs immediately (the app just became active), then once
/// per `every`. Abort the returned handle to stop it.
pub fn spawn_device_loop(
    handler: Arc<CheckDeviceRemindersHandler>,
    clock: Arc<dyn Clock>,
    settings: DeviceSettings,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let today = clock.today();
            let report = handler
                .handle(CheckDeviceRemindersCommand { today, settings })
                .await;
            tracing::debug!(%today, shown = report.shown, "Device reminder tick");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::notifier::RecordingNotifier;
    use crate::adapters::storage::InMemorySubscriptionStore;
    use crate::domain::foundation::SubscriptionId;
    use crate::domain::subscription::{BillingInterval, Currency, ReminderLead, Subscription};
    use crate::ports::NotificationPermission;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn first_check_runs_immediately() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
        let sub = Subscription::new(
            SubscriptionId::parse("n").unwrap(),
            "Netflix",
            Decimal::new(1599, 2),
            Currency::Usd,
            BillingInterval::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
        .unwrap()
        .with_reminder(ReminderLead::DaysBefore(3));
        let notifier = RecordingNotifier::with_permission(NotificationPermission::Granted);
        let handler = Arc::new(CheckDeviceRemindersHandler::new(
            Arc::new(InMemorySubscriptionStore::with_subscriptions(&[sub])),
            Arc::new(notifier.clone()),
        ));

        let handle = spawn_device_loop(
            handler,
            Arc::new(FixedClock(today)),
            DeviceSettings::default(),
            Duration::from_secs(3600),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert_eq!(notifier.shown().len(), 1);
    }
}
