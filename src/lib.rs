//! TidySub - subscription tracking with billing-date reminders.
//!
//! # Architecture
//!
//! This crate follows hexagonal architecture:
//! - `domain`: Subscription model, billing date calculator, reminder evaluator
//! - `ports`: Trait definitions for stores, push delivery, notifiers and clocks
//! - `adapters`: Implementations of ports (memory, file, Redis, PostgreSQL, HTTP)
//! - `application`: Command handlers orchestrating domain and ports
//! - `config`: Layered configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
