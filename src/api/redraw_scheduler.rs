use serde::{Deserialize, Serialize};
use tracing::trace;

/// Diagnostics counters of a [`RedrawScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RedrawStats {
    /// Total `schedule()` calls.
    pub requested: u64,
    /// Requests that superseded a still-pending one.
    pub coalesced: u64,
    /// Keys handed out to the renderer.
    pub delivered: u64,
}

/// Single owner of the animation key.
///
/// Any number of `schedule()` calls between two ticks collapse into one
/// pending redraw; a newer request supersedes the pending one instead of
/// queueing behind it. Keys are strictly increasing across delivered frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    last_key: u64,
    pending: Option<u64>,
    stats: RedrawStats,
}

impl RedrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a redraw on the next tick and returns the key it will carry.
    pub fn schedule(&mut self) -> u64 {
        self.last_key += 1;
        self.stats.requested += 1;
        if let Some(superseded) = self.pending.replace(self.last_key) {
            self.stats.coalesced += 1;
            trace!(superseded, key = self.last_key, "redraw request coalesced");
        }
        self.last_key
    }

    /// Drops a pending redraw without delivering it.
    pub fn cancel(&mut self) -> Option<u64> {
        self.pending.take()
    }

    /// Animation-frame tick: hands out the pending key, at most once.
    pub fn take_pending(&mut self) -> Option<u64> {
        let key = self.pending.take()?;
        self.stats.delivered += 1;
        Some(key)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending_key(&self) -> Option<u64> {
        self.pending
    }

    #[must_use]
    pub fn last_key(&self) -> u64 {
        self.last_key
    }

    #[must_use]
    pub fn stats(&self) -> RedrawStats {
        self.stats
    }
}
