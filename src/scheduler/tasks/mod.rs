//! Scheduled task implementations

pub mod duplicate_cleanup;
