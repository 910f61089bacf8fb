//! Integration tests for the reminder pipeline.
//!
//! Drives both triggers against the same JSON file store:
//! 1. Mixed camelCase / snake_case records are normalized on load
//! 2. The server sweep and the device loop produce identical text
//! 3. Malformed records are rejected without stopping the run

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tempfile::TempDir;

use tidysub::adapters::ledger::InMemoryNotificationLedger;
use tidysub::adapters::notifier::RecordingNotifier;
use tidysub::adapters::push::MockPushTransport;
use tidysub::adapters::storage::FileSubscriptionStore;
use tidysub::application::handlers::reminders::{
    CheckDeviceRemindersCommand, CheckDeviceRemindersHandler, DeviceSettings, PushSetup,
    RunReminderSweepCommand, RunReminderSweepHandler, SweepSettings,
};
use tidysub::ports::NotificationPermission;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Writes the device's list the way the web app stores it.
fn seeded_store(dir: &TempDir) -> FileSubscriptionStore {
    let path = dir.path().join("subscriptions.json");
    let records = json!([
        {
            "id": "netflix",
            "name": "Netflix",
            "amount": 15.99,
            "currency": "USD",
            "billingInterval": "Monthly",
            "startDate": "2024-01-15",
            "reminderDays": 3,
            "pushSubscription": { "endpoint": "https://push.example/netflix", "keys": { "auth": "a" } }
        },
        {
            "id": "spotify",
            "name": "Spotify",
            "amount": "9.99",
            "billing_interval": "monthly",
            "start_date": "2023-12-13T00:00:00.000Z",
            "reminder_days": 1,
            "push_subscription": "{\"endpoint\":\"https://push.example/spotify\"}"
        },
        {
            "id": "broken",
            "name": "Broken",
            "amount": 5,
            "startDate": "not a date",
            "reminderDays": 3
        },
        {
            "id": "paused",
            "name": "Paused",
            "amount": 5,
            "startDate": "2024-01-15",
            "isActive": false,
            "reminderDays": 3,
            "pushSubscription": { "endpoint": "https://push.example/paused" }
        }
    ]);
    std::fs::write(&path, records.to_string()).unwrap();
    FileSubscriptionStore::new(path)
}

#[tokio::test]
async fn server_sweep_notifies_due_subscriptions_from_file_store() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(seeded_store(&dir));
    let push = Arc::new(MockPushTransport::new());
    let handler = RunReminderSweepHandler::new(
        store,
        PushSetup::ready(push.clone()),
        SweepSettings::default(),
    )
    .with_ledger(Arc::new(InMemoryNotificationLedger::new()));

    let report = handler
        .handle(RunReminderSweepCommand { today: date(2024, 2, 12) })
        .await
        .unwrap();

    assert_eq!(report.notified, 2);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.failed, 0);

    let mut sent = push.sent();
    sent.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
    assert_eq!(sent[0].endpoint, "https://push.example/netflix");
    assert_eq!(sent[0].payload.title, "Upcoming Payment");
    assert_eq!(sent[0].payload.body, "Your Netflix subscription is due in 3 days.");
    assert_eq!(sent[1].endpoint, "https://push.example/spotify");
    assert_eq!(sent[1].payload.title, "Payment Due Tomorrow");
    assert_eq!(sent[1].payload.body, "Your Spotify subscription is due tomorrow!");
}

#[tokio::test]
async fn device_loop_shows_the_same_text_as_push() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(seeded_store(&dir));

    let push = Arc::new(MockPushTransport::new());
    RunReminderSweepHandler::new(store.clone(), PushSetup::ready(push.clone()), SweepSettings::default())
        .handle(RunReminderSweepCommand { today: date(2024, 2, 12) })
        .await
        .unwrap();

    let notifier = Arc::new(RecordingNotifier::with_permission(NotificationPermission::Granted));
    let report = CheckDeviceRemindersHandler::new(store, notifier.clone())
        .handle(CheckDeviceRemindersCommand {
            today: date(2024, 2, 12),
            settings: DeviceSettings::default(),
        })
        .await;
    assert_eq!(report.shown, 2);

    let mut pushed: Vec<(String, String)> = push
        .sent()
        .into_iter()
        .map(|p| (p.payload.title, p.payload.body))
        .collect();
    let mut shown: Vec<(String, String)> = notifier
        .shown()
        .into_iter()
        .map(|n| (n.title, n.body))
        .collect();
    pushed.sort();
    shown.sort();
    assert_eq!(pushed, shown);

    let mut tags: Vec<String> = notifier.shown().into_iter().map(|n| n.tag).collect();
    tags.sort();
    assert_eq!(tags, vec!["reminder-netflix", "reminder-spotify"]);
}

#[tokio::test]
async fn nothing_fires_the_day_before() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(seeded_store(&dir));
    let push = Arc::new(MockPushTransport::new());

    let report = RunReminderSweepHandler::new(store, PushSetup::ready(push.clone()), SweepSettings::default())
        .handle(RunReminderSweepCommand { today: date(2024, 2, 11) })
        .await
        .unwrap();

    assert_eq!(report.notified, 0);
    assert_eq!(push.sent_count(), 0);
}

#[tokio::test]
async fn denied_permission_suppresses_device_reminders() {
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::with_permission(NotificationPermission::Denied));

    let report = CheckDeviceRemindersHandler::new(Arc::new(seeded_store(&dir)), notifier.clone())
        .handle(CheckDeviceRemindersCommand {
            today: date(2024, 2, 12),
            settings: DeviceSettings::default(),
        })
        .await;

    assert!(report.suppressed);
    assert!(notifier.shown().is_empty());
}

#[tokio::test]
async fn stale_trial_end_on_non_trial_record_still_fires() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("subscriptions.json");
    let records = json!([
        {
            "id": "n",
            "name": "Netflix",
            "amount": 15.99,
            "startDate": "2024-01-15",
            "trialPeriod": false,
            "trialEndsOn": "not set",
            "reminderDays": 3,
            "pushSubscription": { "endpoint": "https://push.example/n", "keys": { "auth": "a" } }
        },
        {
            "id": "blank-start",
            "name": "Blank",
            "amount": 5,
            "startDate": "",
            "reminderDays": 3,
            "pushSubscription": { "endpoint": "https://push.example/blank" }
        }
    ]);
    std::fs::write(&path, records.to_string()).unwrap();
    let push = Arc::new(MockPushTransport::new());

    let report = RunReminderSweepHandler::new(
        Arc::new(FileSubscriptionStore::new(path)),
        PushSetup::ready(push.clone()),
        SweepSettings::default(),
    )
    .handle(RunReminderSweepCommand { today: date(2024, 2, 12) })
    .await
    .unwrap();

    assert_eq!(report.notified, 1);
    assert_eq!(report.rejected, 1);
    let sent = push.sent();
    assert_eq!(sent[0].endpoint, "https://push.example/n");
    assert_eq!(sent[0].payload.body, "Your Netflix subscription is due in 3 days.");
}
