//! Virtual-clock timers
//!
//! The queue never reads a wall clock. Hosts feed it elapsed milliseconds
//! (from `setTimeout`, a frame loop, or `thread::sleep`) and tests feed it
//! whatever they like, so the completion path needs no real waiting.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer, usable for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    due_ms: u64,
}

/// One-shot timers over a virtual millisecond clock
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    /// Kept sorted by (due_ms, handle) so firing order is stable
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a one-shot timer `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u32) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let due_ms = self.now_ms + u64::from(delay_ms);
        let pos = self
            .pending
            .partition_point(|t| (t.due_ms, t.handle) <= (due_ms, handle));
        self.pending.insert(pos, PendingTimer { handle, due_ms });
        log::debug!("Timer {:?} scheduled for t={}ms", handle, due_ms);
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        before != self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Milliseconds until `handle` fires, if it is still pending
    pub fn time_until(&self, handle: TimerHandle) -> Option<u64> {
        self.pending
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
    }

    /// Milliseconds until the earliest pending timer fires
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .first()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
    }

    /// Move the clock forward and return the timers that came due, in order
    pub fn advance(&mut self, dt_ms: u64) -> Vec<TimerHandle> {
        self.now_ms += dt_ms;
        let due = self.pending.partition_point(|t| t.due_ms <= self.now_ms);
        self.pending.drain(..due).map(|t| t.handle).collect()
    }
}
