//! Move-event throttling and the time source it runs on

use chrono::Local;
use std::sync::atomic::{AtomicI64, Ordering};

/// Millisecond time source
pub trait Clock: Send + Sync + 'static {
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Clock advanced by hand, for hosts that drive their own timeline
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Lets at most one event through per interval
///
/// Events inside the window are dropped, not queued. An interval of 0
/// disables throttling.
#[derive(Debug, Clone)]
pub struct EventThrottle {
    min_interval_ms: u64,
    last_emit_ms: Option<i64>,
}

impl EventThrottle {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_emit_ms: None,
        }
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    /// Returns true and records `now_ms` if an event may be emitted.
    pub fn should_emit(&mut self, now_ms: i64) -> bool {
        if self.min_interval_ms == 0 {
            return true;
        }

        let due = match self.last_emit_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.min_interval_ms as i64,
            None => true,
        };
        if due {
            self.last_emit_ms = Some(now_ms);
        }
        due
    }
}
