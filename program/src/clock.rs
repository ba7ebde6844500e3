//! Time source for the holding-period check

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Source of the current unix timestamp (seconds)
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep a handle while the ledger owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    /// Moves time forward by `secs` (saturating)
    pub fn advance(&self, secs: u64) {
        let delta = i64::try_from(secs).unwrap_or(i64::MAX);
        let current = self.now.load(Ordering::SeqCst);
        self.now.store(current.saturating_add(delta), Ordering::SeqCst);
    }

    /// Jumps to an absolute timestamp
    pub fn set(&self, timestamp: i64) {
        self.now.store(timestamp, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
