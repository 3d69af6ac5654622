//! Drop scheduler - decides when gravity fires
//!
//! The host calls [`DropScheduler::poll`] with a monotonic clock reading on
//! every frame. A gravity step is due once strictly more than the current
//! interval has passed since the last one.

/// Gravity timer driven by host clock readings (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropScheduler {
    last_drop_ms: u64,
    /// Take the next clock reading as the new baseline instead of dropping.
    rebase_pending: bool,
}

impl DropScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the baseline to be reset to the next clock reading.
    pub fn rebase(&mut self) {
        self.rebase_pending = true;
    }

    /// Reset the baseline to a known time.
    pub fn rebase_at(&mut self, now_ms: u64) {
        self.last_drop_ms = now_ms;
        self.rebase_pending = false;
    }

    /// Returns true when a gravity step is due at `now_ms` and moves the
    /// baseline to `now_ms` in that case.
    pub fn poll(&mut self, now_ms: u64, interval_ms: u32) -> bool {
        if self.rebase_pending {
            self.rebase_at(now_ms);
            return false;
        }
        if now_ms.saturating_sub(self.last_drop_ms) > interval_ms as u64 {
            self.last_drop_ms = now_ms;
            return true;
        }
        false
    }

    pub fn last_drop_ms(&self) -> u64 {
        self.last_drop_ms
    }

    pub fn rebase_pending(&self) -> bool {
        self.rebase_pending
    }
}
