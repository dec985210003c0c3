// HTTP request handlers
use crate::application::monitor_runtime::MonitorError;
use crate::application::options_bridge::MonitorSettings;
use crate::application::settings_store::SettingsError;
use crate::infrastructure::http_response::{accepts_brotli, encoded_response, snapshot_stream};
use crate::infrastructure::list_surface::ListSnapshot;
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ScrollQuery {
    pub scroll: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct OptionsUpdate {
    pub urls: String,
    pub interval_minutes: i64,
}

fn error_status(e: &MonitorError) -> StatusCode {
    match e {
        MonitorError::Settings(SettingsError::InvalidInterval(_)) => StatusCode::BAD_REQUEST,
        MonitorError::Settings(_) => StatusCode::INTERNAL_SERVER_ERROR,
        MonitorError::Stopped => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// The rendered view list as an HTML page
pub async fn list_page(
    Query(query): Query<ScrollQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.list.borrow().clone();
    let page = render_page(&snapshot, query.scroll.unwrap_or(0));

    match encoded_response(page.into_bytes(), "text/html; charset=utf-8", accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn list_rows(State(state): State<Arc<AppState>>) -> Json<ListSnapshot> {
    Json(state.list.borrow().clone())
}

/// Current rows followed by every re-render, one JSON object per line
pub async fn stream_rows(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match snapshot_stream(state.list.clone()) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn toggle_view(Path(id): Path<u32>, State(state): State<Arc<AppState>>) -> StatusCode {
    match state.monitor.toggle_view(id) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => error_status(&e),
    }
}

pub async fn get_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MonitorSettings>, (StatusCode, String)> {
    state
        .monitor
        .read_options()
        .await
        .map(Json)
        .map_err(|e| (error_status(&e), e.to_string()))
}

/// Persist new options; the monitor rebuilds its views before answering
pub async fn put_options(
    State(state): State<Arc<AppState>>,
    Json(update): Json<OptionsUpdate>,
) -> Result<Json<MonitorSettings>, (StatusCode, String)> {
    tracing::info!(?update, "options update requested");

    state
        .monitor
        .update_options(update.urls, update.interval_minutes)
        .await
        .map_err(|e| (error_status(&e), e.to_string()))?;

    get_options(State(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::monitor_runtime::{monitor_channel, run};
    use crate::application::monitor_service::MonitorService;
    use crate::application::options_bridge::OptionsBridge;
    use crate::application::poller::PollQueue;
    use crate::application::scheduler::tests::FakeTimer;
    use crate::application::scheduler::Scheduler;
    use crate::domain::view::View;
    use crate::infrastructure::list_surface::SharedListSurface;
    use crate::infrastructure::network::Reachability;
    use crate::infrastructure::settings_file::MemorySettingsStore;

    struct NoopQueue;

    impl PollQueue for NoopQueue {
        fn submit(&self, _view: View) {}
    }

    fn start() -> Arc<AppState> {
        let (surface, list) = SharedListSurface::new();
        let mut service = MonitorService::new(
            OptionsBridge::new(Box::new(MemorySettingsStore::default())),
            Scheduler::new(Box::new(FakeTimer::default())),
            Box::new(surface),
            Arc::new(Reachability::default()),
            Box::new(NoopQueue),
        );
        service.open().unwrap();

        let (monitor, rx) = monitor_channel();
        tokio::spawn(run(service, rx));
        Arc::new(AppState { monitor, list })
    }

    #[tokio::test]
    async fn test_put_options_rebuilds_rows() {
        let state = start();

        let Json(settings) = put_options(
            State(state.clone()),
            Json(OptionsUpdate {
                urls: "http://a/view,http://b/view".into(),
                interval_minutes: 5,
            }),
        )
        .await
        .unwrap();
        assert_eq!(settings.urls, "http://a/view,http://b/view");

        let Json(snapshot) = list_rows(State(state.clone())).await;
        assert_eq!(snapshot.rows.len(), 2);
        assert!(snapshot.last_poll_time.is_some());
    }

    #[tokio::test]
    async fn test_put_options_rejects_bad_interval() {
        let state = start();
        let err = put_options(
            State(state),
            Json(OptionsUpdate {
                urls: "http://a/view".into(),
                interval_minutes: 0,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_toggle_after_shutdown_is_unavailable() {
        let state = start();
        assert_eq!(toggle_view(Path(0), State(state.clone())).await, StatusCode::ACCEPTED);

        state.monitor.shutdown().unwrap();
        // wait for the loop to drain and drop its receiver
        while state.monitor.read_options().await.is_ok() {
            tokio::task::yield_now().await;
        }
        assert_eq!(toggle_view(Path(0), State(state)).await, StatusCode::SERVICE_UNAVAILABLE);
    }
}
