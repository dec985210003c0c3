// Single-shot timers on the tokio runtime
use crate::application::host::{Timer, TimerHandle};
use crate::application::monitor_runtime::MonitorEvent;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Each timer is a sleeping task that posts a tick when it wakes.
pub struct TokioTimer {
    events: mpsc::UnboundedSender<MonitorEvent>,
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new(events: mpsc::UnboundedSender<MonitorEvent>) -> Self {
        Self {
            events,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn active(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Timer for TokioTimer {
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(MonitorEvent::Tick(handle));
        });
        self.tasks.insert(handle, task);

        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
