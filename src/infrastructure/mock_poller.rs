// Mock poller producing canned job statuses without a CI server
use crate::application::poller::Poller;
use crate::domain::view::{Job, View};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const JOB_SUFFIXES: [&str; 3] = ["build", "test", "deploy"];
const COLOR_CYCLE: [&str; 4] = ["blue", "blue_anime", "yellow", "red"];

/// Each refresh advances every job one step through a fixed colour cycle.
#[derive(Debug, Default)]
pub struct MockPoller {
    latency: Duration,
    refreshes: AtomicUsize,
}

impl MockPoller {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            refreshes: AtomicUsize::new(0),
        }
    }

    fn view_name(url: &str) -> &str {
        url.trim_end_matches('/')
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("view")
    }

    fn mock_jobs(view: &View, step: usize) -> Vec<Job> {
        let name = Self::view_name(&view.url);
        let base = view.url.trim_end_matches('/');

        JOB_SUFFIXES
            .iter()
            .enumerate()
            .map(|(i, suffix)| {
                let job_name = format!("{name}-{suffix}");
                let color = COLOR_CYCLE[(step + i) % COLOR_CYCLE.len()];
                Job::new(job_name.clone(), format!("{base}/job/{job_name}/"), color.to_string())
            })
            .collect()
    }
}

#[async_trait]
impl Poller for MockPoller {
    async fn refresh(&self, view: &View) -> anyhow::Result<View> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let step = self.refreshes.fetch_add(1, Ordering::Relaxed);
        Ok(view.with_jobs(Self::mock_jobs(view, step)))
    }
}
