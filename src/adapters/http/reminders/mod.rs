//! HTTP adapter for reminder endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ReminderAppState;
pub use routes::reminder_router;
