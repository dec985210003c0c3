// Network reachability as observed by the poller
use crate::application::host::NetworkStatus;
use std::sync::atomic::{AtomicBool, Ordering};

/// Online flag shared between the poller, which reports what it sees, and
/// the scheduler, which reads it on every re-arm.
#[derive(Debug)]
pub struct Reachability {
    online: AtomicBool,
}

impl Reachability {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn mark_online(&self) {
        if !self.online.swap(true, Ordering::Relaxed) {
            tracing::info!("network is back online");
        }
    }

    pub fn mark_offline(&self) {
        if self.online.swap(false, Ordering::Relaxed) {
            tracing::warn!("network looks offline");
        }
    }
}

impl Default for Reachability {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NetworkStatus for Reachability {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}
