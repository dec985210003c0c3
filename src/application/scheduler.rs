// Status scheduler - owns the single repeating refresh timer
use crate::application::host::{Timer, TimerHandle};
use std::time::Duration;

/// How often to check again while the network is offline
pub const OFFLINE_RECHECK_INTERVAL: Duration = Duration::from_secs(30);

pub const DEFAULT_POLLING_INTERVAL_MINUTES: u32 = 5;

/// Pick the delay until the next status update
pub fn next_interval(online: bool, polling_interval_minutes: u32) -> Duration {
    if online {
        Duration::from_secs(u64::from(polling_interval_minutes) * 60)
    } else {
        OFFLINE_RECHECK_INTERVAL
    }
}

/// Idle when `pending` is `None`, armed otherwise. Every new timer cancels
/// the tracked one first, so at most one is ever outstanding.
pub struct Scheduler {
    timer: Box<dyn Timer>,
    pending: Option<TimerHandle>,
}

impl Scheduler {
    pub fn new(timer: Box<dyn Timer>) -> Self {
        Self {
            timer,
            pending: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn rearm(&mut self, online: bool, polling_interval_minutes: u32) -> Duration {
        self.cancel();
        let delay = next_interval(online, polling_interval_minutes);
        let handle = self.timer.set_timeout(delay);
        tracing::debug!(?handle, ?delay, online, "scheduler armed");
        self.pending = Some(handle);
        delay
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.clear_timeout(handle);
            tracing::debug!(?handle, "scheduler cancelled");
        }
    }

    /// Record that `handle` fired. Returns false for a tick from a timer that
    /// was already cancelled or replaced.
    pub fn fired(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            tracing::debug!(?handle, current = ?self.pending, "ignoring stale tick");
            false
        }
    }
}
