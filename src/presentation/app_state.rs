// Application state for HTTP handlers
use crate::application::monitor_runtime::MonitorHandle;
use crate::infrastructure::list_surface::ListSnapshot;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub monitor: MonitorHandle,
    pub list: watch::Receiver<ListSnapshot>,
}
