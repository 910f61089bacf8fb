//! Reminder handlers.
//!
//! ## Commands
//! - Running the server reminder sweep (cron trigger)
//! - Checking reminders on the device (timer trigger)
//! - Sending an ad hoc push notification

mod device_loop;
mod device_reminders;
mod push_setup;
mod run_reminder_sweep;
mod send_notification;

pub use device_loop::spawn_device_loop;
pub use device_reminders::{
    CheckDeviceRemindersCommand, CheckDeviceRemindersHandler, DeviceCheckReport, DeviceSettings,
};
pub use push_setup::PushSetup;
pub use run_reminder_sweep::{
    RunReminderSweepCommand, RunReminderSweepHandler, SweepReport, SweepSettings,
};
pub use send_notification::{SendNotificationCommand, SendNotificationHandler};
