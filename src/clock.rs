//! Elapsed-time source for log line stamps

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Session clock passed to every line start
pub trait Clock: Send {
    /// Time since the last reset
    fn elapsed(&self) -> Duration;

    /// Restart counting from zero
    fn reset(&mut self);
}

/// Clock backed by the runtime's monotonic time
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    started: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn reset(&mut self) {
        self.started = Instant::now();
    }
}

/// Externally driven clock for tests and replays.
///
/// Clones share the same time value; `reset` rewinds it to zero.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, elapsed: Duration) {
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.millis.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }

    fn reset(&mut self) {
        self.millis.store(0, Ordering::SeqCst);
    }
}

/// `<seconds>.<centiseconds>` as written in the first column
pub fn format_stamp(elapsed: Duration) -> String {
    format!("{}.{:02}", elapsed.as_secs(), elapsed.subsec_millis() / 10)
}
