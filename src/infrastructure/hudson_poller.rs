// Hudson/Jenkins JSON API poller
use crate::application::poller::Poller;
use crate::domain::view::{Job, View, DEFAULT_COLOR};
use crate::infrastructure::network::Reachability;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const JOB_TREE: &str = "jobs[name,url,color]";

#[derive(Debug, Error)]
pub enum PollError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to decode job list from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Deserialize)]
struct HudsonViewResponse {
    #[serde(default)]
    jobs: Vec<HudsonJob>,
}

#[derive(Debug, Deserialize)]
struct HudsonJob {
    name: String,
    #[serde(default)]
    url: String,
    /// Folders and some job types carry no colour
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HudsonPoller {
    client: reqwest::Client,
    reachability: Arc<Reachability>,
}

impl HudsonPoller {
    pub fn new(request_timeout: Duration, reachability: Arc<Reachability>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("hudson-view-monitor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            reachability,
        })
    }

    fn api_url(view_url: &str) -> String {
        format!(
            "{}/api/json?tree={}",
            view_url.trim_end_matches('/'),
            urlencoding::encode(JOB_TREE)
        )
    }

    async fn fetch(&self, view: &View) -> Result<HudsonViewResponse, PollError> {
        let url = Self::api_url(&view.url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| {
                if source.is_connect() || source.is_timeout() {
                    self.reachability.mark_offline();
                }
                PollError::Request {
                    url: url.clone(),
                    source,
                }
            })?;

        // any answer at all means the network is up
        self.reachability.mark_online();

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status { url, status });
        }

        response
            .json::<HudsonViewResponse>()
            .await
            .map_err(|source| PollError::Decode { url, source })
    }
}

fn jobs_from_response(response: HudsonViewResponse) -> Vec<Job> {
    response
        .jobs
        .into_iter()
        .map(|job| {
            Job::new(
                job.name,
                job.url,
                job.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            )
        })
        .collect()
}

#[async_trait]
impl Poller for HudsonPoller {
    async fn refresh(&self, view: &View) -> anyhow::Result<View> {
        let response = self.fetch(view).await?;
        let updated = view.with_jobs(jobs_from_response(response));

        tracing::debug!(
            url = %view.url,
            jobs = updated.jobs.len(),
            color = %updated.color,
            "view refreshed"
        );
        Ok(updated)
    }
}
