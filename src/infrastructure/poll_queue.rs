// Poll queue spawning one tokio task per submitted view
use crate::application::monitor_runtime::MonitorEvent;
use crate::application::poller::{PollQueue, Poller};
use crate::domain::view::View;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Completions are posted back to the monitor loop in whatever order they
/// finish. In-flight refreshes are never cancelled.
pub struct SpawningPollQueue {
    poller: Arc<dyn Poller>,
    events: mpsc::UnboundedSender<MonitorEvent>,
}

impl SpawningPollQueue {
    pub fn new(poller: Arc<dyn Poller>, events: mpsc::UnboundedSender<MonitorEvent>) -> Self {
        Self { poller, events }
    }
}

impl PollQueue for SpawningPollQueue {
    fn submit(&self, view: View) {
        let poller = self.poller.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            match poller.refresh(&view).await {
                Ok(updated) => {
                    if events.send(MonitorEvent::PollCompleted(updated)).is_err() {
                        tracing::debug!(url = %view.url, "monitor stopped before poll completed");
                    }
                }
                Err(e) => {
                    tracing::warn!(url = %view.url, "poll failed: {:#}", e);
                }
            }
        });
    }
}
