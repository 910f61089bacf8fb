//! HTTP middleware for axum.
//!
//! - `cron_auth` - Bearer-secret guard for the scheduled reminder trigger

pub mod cron_auth;

pub use cron_auth::{cron_auth_middleware, CronAuth};
