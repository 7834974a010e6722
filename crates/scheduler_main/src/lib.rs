//! Scheduler Main - process setup for the scheduler bot
//!
//! Configuration and credential loading plus logging setup, shared by the
//! `scheduler` binary and its tests.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
