// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::monitor_runtime::{monitor_channel, run};
use crate::application::monitor_service::MonitorService;
use crate::application::options_bridge::OptionsBridge;
use crate::application::poller::Poller;
use crate::application::scheduler::Scheduler;
use crate::infrastructure::config::{load_monitor_config, PollerKind};
use crate::infrastructure::hudson_poller::HudsonPoller;
use crate::infrastructure::list_surface::SharedListSurface;
use crate::infrastructure::mock_poller::MockPoller;
use crate::infrastructure::network::Reachability;
use crate::infrastructure::poll_queue::SpawningPollQueue;
use crate::infrastructure::settings_file::FileSettingsStore;
use crate::infrastructure::tokio_timer::TokioTimer;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_options, health_check, list_page, list_rows, put_options, stream_rows, toggle_view,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_monitor_config()?;

    // Infrastructure
    let reachability = Arc::new(Reachability::default());
    let poller: Arc<dyn Poller> = match config.poller.kind {
        PollerKind::Hudson => Arc::new(HudsonPoller::new(
            Duration::from_secs(config.poller.request_timeout_secs),
            reachability.clone(),
        )?),
        PollerKind::Mock => Arc::new(MockPoller::new(Duration::from_millis(250))),
    };
    let settings_store = FileSettingsStore::open(&config.settings.path)?;
    let (surface, list) = SharedListSurface::new();
    let (monitor, events) = monitor_channel();

    // Monitor core, owned by a single task
    let mut service = MonitorService::new(
        OptionsBridge::new(Box::new(settings_store)),
        Scheduler::new(Box::new(TokioTimer::new(monitor.sender()))),
        Box::new(surface),
        reachability,
        Box::new(SpawningPollQueue::new(poller, monitor.sender())),
    );
    service.open()?;
    let monitor_task = tokio::spawn(run(service, events));

    let state = Arc::new(AppState {
        monitor: monitor.clone(),
        list,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(list_page))
        .route("/rows", get(list_rows))
        .route("/rows/stream", get(stream_rows))
        .route("/views/:id/toggle", post(toggle_view))
        .route("/options", get(get_options).put(put_options))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.listen_addr.parse()?;
    tracing::info!(poller = ?config.poller.kind, "Starting hudson-view-monitor on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    // Stop the timer chain before exiting
    let _ = monitor.shutdown();
    monitor_task.await?;

    Ok(())
}
