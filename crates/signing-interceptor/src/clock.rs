use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, FixedOffset, Local};

/// Source of the current instant, in the offset timestamps should be
/// rendered in.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Settable clock for tests.
#[derive(Debug, Clone)]
pub struct FakeTimeSource {
    t: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl FakeTimeSource {
    pub fn new_set(t: DateTime<FixedOffset>) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
        }
    }

    pub fn set(&self, t: DateTime<FixedOffset>) {
        *self.t.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = t;
    }

    pub fn advance(&self, time_quantum: Duration) {
        let mut t = self.t.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *t += time_quantum;
    }
}

impl TimeSource for FakeTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.t.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
