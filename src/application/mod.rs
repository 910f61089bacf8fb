//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::reminders::{
    spawn_device_loop, CheckDeviceRemindersCommand, CheckDeviceRemindersHandler,
    DeviceCheckReport, DeviceSettings, PushSetup, RunReminderSweepCommand,
    RunReminderSweepHandler, SendNotificationCommand, SendNotificationHandler, SweepReport,
    SweepSettings,
};
