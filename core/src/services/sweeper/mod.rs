//! Expiration sweeper for used refresh token records
//!
//! This module provides the scheduled cleanup run by the cron binary:
//! - A single idempotent sweep (`run_once`)
//! - The daily schedule in the reference zone
//! - An optional diagnostic polling loop that only counts records

mod schedule;
mod service;

pub use schedule::{next_run_after, SweeperSchedule};
pub use service::{ExpirationSweeper, SweepResult};
