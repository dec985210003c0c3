// Monitor service - view set state and the poll/render cycle
use crate::application::host::{ListSurface, NetworkStatus, TimerHandle};
use crate::application::options_bridge::{MonitorSettings, OptionsBridge};
use crate::application::poller::PollQueue;
use crate::application::renderer;
use crate::application::scheduler::Scheduler;
use crate::application::settings_store::SettingsError;
use crate::domain::view::View;
use crate::domain::view_set::{build_view_set, view_by_id_mut};
use chrono::{DateTime, Local, Timelike};
use std::sync::Arc;

/// Poll stamp as shown next to the list, e.g. `9:05`
pub fn format_poll_time(now: DateTime<Local>) -> String {
    format!("{}:{:02}", now.hour(), now.minute())
}

/// Owns the view set. All methods run on the single task that drives the
/// monitor, so no locking is needed.
pub struct MonitorService {
    views: Vec<View>,
    settings: MonitorSettings,
    options: OptionsBridge,
    scheduler: Scheduler,
    surface: Box<dyn ListSurface>,
    network: Arc<dyn NetworkStatus>,
    polls: Box<dyn PollQueue>,
}

impl MonitorService {
    pub fn new(
        options: OptionsBridge,
        scheduler: Scheduler,
        surface: Box<dyn ListSurface>,
        network: Arc<dyn NetworkStatus>,
        polls: Box<dyn PollQueue>,
    ) -> Self {
        Self {
            views: Vec::new(),
            settings: MonitorSettings::default(),
            options,
            scheduler,
            surface,
            network,
            polls,
        }
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub fn is_armed(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Initial load: store defaults, build the view set and start polling
    pub fn open(&mut self) -> Result<(), SettingsError> {
        self.options.initialize_defaults()?;
        self.reload();
        Ok(())
    }

    /// Settings changed: drop the timer and every view, then start over.
    /// Expansion state is not carried across a reload.
    pub fn on_option_changed(&mut self) {
        self.scheduler.cancel();
        self.reload();
    }

    pub fn update_options(&mut self, urls: String, interval_minutes: i64) -> Result<(), SettingsError> {
        self.options.update(urls, interval_minutes)?;
        self.on_option_changed();
        Ok(())
    }

    fn reload(&mut self) {
        self.settings = self.options.read();
        self.views = build_view_set(&self.settings.urls);
        tracing::info!(
            views = self.views.len(),
            interval_minutes = self.settings.interval_minutes,
            "view set rebuilt"
        );

        self.render(None);
        if !self.views.is_empty() {
            self.update_status();
        }
    }

    /// Submit every view for polling in creation order, then re-arm
    pub fn update_status(&mut self) {
        self.surface.set_last_poll_time(format_poll_time(Local::now()));

        for view in &self.views {
            self.polls.submit(view.clone());
        }
        tracing::debug!(views = self.views.len(), "polling submitted");

        let online = self.network.is_online();
        if !online {
            tracing::info!("network offline, rechecking soon");
        }
        self.scheduler.rearm(online, self.settings.interval_minutes);
    }

    pub fn on_tick(&mut self, handle: TimerHandle) {
        if self.scheduler.fired(handle) {
            self.update_status();
        }
    }

    pub fn on_poll_completed(&mut self, updated: View) {
        self.render(Some(updated));
    }

    /// Flip one view's expansion and redraw the whole list
    pub fn toggle_view(&mut self, view_id: u32) -> bool {
        match view_by_id_mut(&mut self.views, view_id) {
            Some(view) => {
                view.toggle_expanded();
                self.render(None);
                true
            }
            None => {
                tracing::debug!(view_id, "toggle for unknown view");
                false
            }
        }
    }

    /// Redraw from scratch, first folding in a poll result if given
    pub fn render(&mut self, updated: Option<View>) {
        if let Some(updated) = updated {
            let url = updated.url.clone();
            if !renderer::apply_update(&mut self.views, updated) {
                tracing::debug!(%url, "poll result for a view no longer configured");
            }
        }

        let rows = renderer::draw(self.surface.as_mut(), &self.views);
        tracing::trace!(rows, "list rendered");
    }

    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        tracing::info!("monitor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::renderer::tests::RecordingSurface;
    use crate::application::scheduler::tests::FakeTimer;
    use crate::application::settings_store::{SettingValue, SettingsStore};
    use crate::application::options_bridge::{INTERVAL_KEY, URLS_KEY};
    use crate::domain::list_row::ListRow;
    use crate::domain::view::Job;
    use crate::infrastructure::settings_file::MemorySettingsStore;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct RecordingQueue {
        submitted: Arc<Mutex<Vec<View>>>,
    }

    impl PollQueue for RecordingQueue {
        fn submit(&self, view: View) {
            self.submitted.lock().unwrap().push(view);
        }
    }

    struct FlagNetwork(AtomicBool);

    impl NetworkStatus for FlagNetwork {
        fn is_online(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    struct Harness {
        service: MonitorService,
        timer: FakeTimer,
        surface: RecordingSurface,
        queue: RecordingQueue,
        network: Arc<FlagNetwork>,
    }

    fn harness(urls: &str, interval: i64) -> Harness {
        let mut store = MemorySettingsStore::default();
        store.put_value(URLS_KEY, SettingValue::Text(urls.into())).unwrap();
        store.put_value(INTERVAL_KEY, SettingValue::Integer(interval)).unwrap();

        let timer = FakeTimer::default();
        let surface = RecordingSurface::default();
        let queue = RecordingQueue::default();
        let network = Arc::new(FlagNetwork(AtomicBool::new(true)));

        let service = MonitorService::new(
            OptionsBridge::new(Box::new(store)),
            Scheduler::new(Box::new(timer.clone())),
            Box::new(surface.clone()),
            network.clone(),
            Box::new(queue.clone()),
        );

        Harness {
            service,
            timer,
            surface,
            queue,
            network,
        }
    }

    fn job(name: &str, color: &str) -> Job {
        Job::new(name.into(), format!("http://ci/job/{name}/"), color.into())
    }

    fn header_colors(rows: &[ListRow]) -> Vec<String> {
        rows.iter()
            .filter_map(|r| match r {
                ListRow::Header { color, .. } => Some(color.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_format_poll_time() {
        let morning = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).unwrap();
        assert_eq!(format_poll_time(morning), "9:05");
        let evening = Local.with_ymd_and_hms(2024, 3, 1, 21, 42, 0).unwrap();
        assert_eq!(format_poll_time(evening), "21:42");
    }

    #[test]
    fn test_open_builds_views_and_polls() {
        let mut h = harness("http://a/view,http://b/view", 5);
        h.service.open().unwrap();

        let views = h.service.views();
        assert_eq!(views.len(), 2);
        assert_eq!((views[0].id, views[0].url.as_str()), (0, "http://a/view"));
        assert_eq!((views[1].id, views[1].url.as_str()), (1, "http://b/view"));

        let rows = h.surface.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| matches!(r, ListRow::Header { expanded: false, .. })));

        let submitted: Vec<String> = h.queue.submitted.lock().unwrap().iter().map(|v| v.url.clone()).collect();
        assert_eq!(submitted, vec!["http://a/view", "http://b/view"]);
        assert!(h.service.is_armed());
        assert_eq!(h.timer.last_delay(), Some(Duration::from_millis(300_000)));
        assert!(h.surface.log.lock().unwrap().last_poll_time.is_some());
    }

    #[test]
    fn test_open_with_no_urls_stays_idle() {
        let mut h = harness("", 5);
        h.service.open().unwrap();
        assert!(h.service.views().is_empty());
        assert!(!h.service.is_armed());
        assert!(h.queue.submitted.lock().unwrap().is_empty());
        assert!(h.surface.rows().is_empty());
    }

    #[test]
    fn test_offline_uses_short_interval() {
        let mut h = harness("http://a/view", 60);
        h.network.0.store(false, Ordering::SeqCst);
        h.service.open().unwrap();
        assert_eq!(h.timer.last_delay(), Some(Duration::from_millis(30_000)));

        h.network.0.store(true, Ordering::SeqCst);
        let handle = h.service.scheduler.pending().unwrap();
        h.timer.fire(handle);
        h.service.on_tick(handle);
        assert_eq!(h.timer.last_delay(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_tick_polls_again_and_rearms() {
        let mut h = harness("http://a/view,http://b/view", 5);
        h.service.open().unwrap();
        let handle = h.service.scheduler.pending().unwrap();

        h.timer.fire(handle);
        h.service.on_tick(handle);

        assert_eq!(h.queue.submitted.lock().unwrap().len(), 4);
        assert!(h.service.is_armed());
        assert_eq!(h.timer.outstanding(), 1);
    }

    #[test]
    fn test_stale_tick_does_not_poll() {
        let mut h = harness("http://a/view", 5);
        h.service.open().unwrap();
        let old = h.service.scheduler.pending().unwrap();
        h.service.on_option_changed();

        let before = h.queue.submitted.lock().unwrap().len();
        h.service.on_tick(old);
        assert_eq!(h.queue.submitted.lock().unwrap().len(), before);
        assert_eq!(h.timer.outstanding(), 1);
    }

    #[test]
    fn test_option_change_leaves_one_timer() {
        let mut h = harness("http://a/view", 5);
        h.service.open().unwrap();
        assert_eq!(h.timer.outstanding(), 1);

        h.service.update_options("http://a/view,http://c/view".into(), 10).unwrap();
        assert_eq!(h.timer.outstanding(), 1);
        assert_eq!(h.timer.last_delay(), Some(Duration::from_secs(600)));
        assert_eq!(h.service.views().len(), 2);
    }

    #[test]
    fn test_option_change_discards_expansion() {
        let mut h = harness("http://a/view,http://b/view", 5);
        h.service.open().unwrap();
        assert!(h.service.toggle_view(0));
        assert!(h.service.views()[0].expanded);

        h.service.on_option_changed();
        assert!(h.service.views().iter().all(|v| !v.expanded));
    }

    #[test]
    fn test_option_change_to_empty_clears_list() {
        let mut h = harness("http://a/view", 5);
        h.service.open().unwrap();
        h.service.update_options(String::new(), 5).unwrap();
        assert!(h.surface.rows().is_empty());
        assert!(!h.service.is_armed());
        assert_eq!(h.timer.outstanding(), 0);
    }

    #[test]
    fn test_invalid_options_keep_current_state() {
        let mut h = harness("http://a/view", 5);
        h.service.open().unwrap();
        assert!(h.service.update_options("http://z/view".into(), -3).is_err());
        assert_eq!(h.service.views()[0].url, "http://a/view");
        assert_eq!(h.timer.outstanding(), 1);
    }

    #[test]
    fn test_poll_completion_updates_one_view() {
        let mut h = harness("http://a/view,http://b/view", 5);
        h.service.open().unwrap();

        let polled_b = h.service.views()[1].with_jobs(vec![job("b1", "red")]);
        h.service.on_poll_completed(polled_b);
        assert_eq!(header_colors(&h.surface.rows()), vec!["grey", "red"]);

        let polled_a = h.service.views()[0].with_jobs(vec![job("a1", "blue")]);
        h.service.on_poll_completed(polled_a);
        assert_eq!(header_colors(&h.surface.rows()), vec!["blue", "red"]);
    }

    #[test]
    fn test_toggle_shows_and_hides_only_that_view() {
        let mut h = harness("http://a/view,http://b/view", 5);
        h.service.open().unwrap();
        let polled_a = h.service.views()[0].with_jobs(vec![job("a1", "blue"), job("a2", "red")]);
        let polled_b = h.service.views()[1].with_jobs(vec![job("b1", "blue")]);
        h.service.on_poll_completed(polled_a);
        h.service.on_poll_completed(polled_b);

        assert!(h.service.toggle_view(1));
        let rows = h.surface.rows();
        assert_eq!(rows.len(), 3);
        assert!(matches!(&rows[2], ListRow::Job { name, .. } if name == "b1"));
        assert!(!h.service.views()[0].expanded);

        assert!(h.service.toggle_view(1));
        assert_eq!(h.surface.rows().len(), 2);

        assert!(!h.service.toggle_view(9));
    }

    #[test]
    fn test_poll_completion_keeps_expansion_set_while_in_flight() {
        let mut h = harness("http://a/view", 5);
        h.service.open().unwrap();
        let submitted = h.queue.submitted.lock().unwrap()[0].clone();

        h.service.toggle_view(0);
        h.service.on_poll_completed(submitted.with_jobs(vec![job("a1", "blue")]));

        assert!(h.service.views()[0].expanded);
        assert_eq!(h.surface.rows().len(), 2);
    }

    #[test]
    fn test_shutdown_cancels_timer() {
        let mut h = harness("http://a/view", 5);
        h.service.open().unwrap();
        h.service.shutdown();
        assert!(!h.service.is_armed());
        assert_eq!(h.timer.outstanding(), 0);
    }
}
