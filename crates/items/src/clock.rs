//! Time source for item timestamps.

use chrono::{DateTime, Utc};

/// Source of "now" for `createdAt` / `updatedAt`.
///
/// Injected into the store so tests can control time.
pub trait Clock: Send + Sync + core::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
