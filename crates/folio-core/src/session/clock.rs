//! Wall-clock abstraction.

use chrono::{DateTime, Utc};

/// Source of the current wall-clock time.
///
/// Expiry timestamps are absolute and outlive the process, so they are
/// computed from wall-clock time rather than a monotonic clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
