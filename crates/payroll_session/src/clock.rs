//! Time sources for session flows.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::types::{Timestamp, TimestampMillis};

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> TimestampMillis;

    fn now_secs(&self) -> Timestamp {
        self.now_millis() / 1000
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> TimestampMillis {
        Utc::now().timestamp_millis().max(0) as TimestampMillis
    }
}

/// Hand-driven clock for tests and scripted demos. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn at_secs(secs: Timestamp) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(secs * 1000)),
        }
    }

    pub fn advance_secs(&self, secs: u64) {
        self.millis.fetch_add(secs * 1000, Ordering::SeqCst);
    }

    pub fn set_secs(&self, secs: Timestamp) {
        self.millis.store(secs * 1000, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> TimestampMillis {
        self.millis.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::at_secs(100);
        let other = clock.clone();
        clock.advance_secs(5);
        assert_eq!(other.now_secs(), 105);
        assert_eq!(other.now_millis(), 105_000);

        other.set_secs(7);
        assert_eq!(clock.now_secs(), 7);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_secs() > 1_577_836_800);
    }
}
