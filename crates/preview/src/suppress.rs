//! Debounce for resize notifications caused by our own layout changes

use std::time::{Duration, Instant};

/// How long resize notifications are ignored after a self-initiated change
pub const RESIZE_EVENT_TIMEOUT: Duration = Duration::from_millis(500);

/// Time source, replaceable in tests
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Drops resize notifications until a deadline passes.
///
/// This is a timestamp comparison, not cancellation: a genuine user resize
/// landing inside the window is dropped as well.
#[derive(Debug, Clone, Copy)]
pub struct ResizeSuppressor {
    timeout: Duration,
    until: Option<Instant>,
}

impl ResizeSuppressor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, until: None }
    }

    /// Ignore notifications arriving before `now + timeout`.
    pub fn suppress(&mut self, now: Instant) {
        self.until = Some(now + self.timeout);
    }

    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}

impl Default for ResizeSuppressor {
    fn default() -> Self {
        Self::new(RESIZE_EVENT_TIMEOUT)
    }
}
