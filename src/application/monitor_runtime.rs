// Event loop owning the monitor service
use crate::application::host::TimerHandle;
use crate::application::monitor_service::MonitorService;
use crate::application::options_bridge::MonitorSettings;
use crate::application::settings_store::SettingsError;
use crate::domain::view::View;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub enum MonitorEvent {
    Tick(TimerHandle),
    PollCompleted(View),
    ToggleView(u32),
    UpdateOptions {
        urls: String,
        interval_minutes: i64,
        reply: oneshot::Sender<Result<(), SettingsError>>,
    },
    ReadOptions(oneshot::Sender<MonitorSettings>),
    Shutdown,
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("monitor is not running")]
    Stopped,
}

/// Cloneable sender side used by timers, poll tasks and HTTP handlers
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    tx: mpsc::UnboundedSender<MonitorEvent>,
}

pub fn monitor_channel() -> (MonitorHandle, mpsc::UnboundedReceiver<MonitorEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MonitorHandle { tx }, rx)
}

impl MonitorHandle {
    pub fn sender(&self) -> mpsc::UnboundedSender<MonitorEvent> {
        self.tx.clone()
    }

    fn send(&self, event: MonitorEvent) -> Result<(), MonitorError> {
        self.tx.send(event).map_err(|_| MonitorError::Stopped)
    }

    pub fn toggle_view(&self, view_id: u32) -> Result<(), MonitorError> {
        self.send(MonitorEvent::ToggleView(view_id))
    }

    pub async fn update_options(&self, urls: String, interval_minutes: i64) -> Result<(), MonitorError> {
        let (reply, rx) = oneshot::channel();
        self.send(MonitorEvent::UpdateOptions {
            urls,
            interval_minutes,
            reply,
        })?;
        rx.await.map_err(|_| MonitorError::Stopped)??;
        Ok(())
    }

    pub async fn read_options(&self) -> Result<MonitorSettings, MonitorError> {
        let (reply, rx) = oneshot::channel();
        self.send(MonitorEvent::ReadOptions(reply))?;
        rx.await.map_err(|_| MonitorError::Stopped)
    }

    pub fn shutdown(&self) -> Result<(), MonitorError> {
        self.send(MonitorEvent::Shutdown)
    }
}

/// Process events one at a time until shutdown or until every sender is gone
pub async fn run(mut service: MonitorService, mut events: mpsc::UnboundedReceiver<MonitorEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            MonitorEvent::Tick(handle) => service.on_tick(handle),
            MonitorEvent::PollCompleted(view) => service.on_poll_completed(view),
            MonitorEvent::ToggleView(view_id) => {
                service.toggle_view(view_id);
            }
            MonitorEvent::UpdateOptions {
                urls,
                interval_minutes,
                reply,
            } => {
                let result = service.update_options(urls, interval_minutes);
                if let Err(e) = &result {
                    tracing::warn!("rejected options update: {}", e);
                }
                let _ = reply.send(result);
            }
            MonitorEvent::ReadOptions(reply) => {
                let _ = reply.send(service.settings().clone());
            }
            MonitorEvent::Shutdown => break,
        }
    }

    service.shutdown();
}
