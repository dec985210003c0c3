// View and job domain models
use serde::Serialize;

/// Colour token shown before the first poll completes
pub const DEFAULT_COLOR: &str = "grey";

const ANIME_SUFFIX: &str = "_anime";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub name: String,
    pub url: String,
    pub color: String,
}

impl Job {
    pub fn new(name: String, url: String, color: String) -> Self {
        Self { name, url, color }
    }

    pub fn is_building(&self) -> bool {
        self.color.ends_with(ANIME_SUFFIX)
    }
}

/// One monitored CI view: a collection of jobs behind a single URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub id: u32,
    pub url: String,
    pub color: String,
    pub expanded: bool,
    pub jobs: Vec<Job>,
}

impl View {
    pub fn new(id: u32, url: String) -> Self {
        Self {
            id,
            url,
            color: DEFAULT_COLOR.to_string(),
            expanded: false,
            jobs: Vec::new(),
        }
    }

    /// Copy of this view carrying a freshly fetched job list; the colour is
    /// aggregated from the jobs.
    pub fn with_jobs(&self, jobs: Vec<Job>) -> Self {
        Self {
            id: self.id,
            url: self.url.clone(),
            color: aggregate_color(&jobs),
            expanded: self.expanded,
            jobs,
        }
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Take the polled colour and jobs from `updated`, keeping local UI state
    pub fn apply_poll(&mut self, updated: View) {
        self.color = updated.color;
        self.jobs = updated.jobs;
    }
}

fn severity(base: &str) -> u8 {
    match base {
        "red" => 4,
        "yellow" => 3,
        "aborted" => 2,
        "blue" => 1,
        _ => 0,
    }
}

fn base_color(color: &str) -> &str {
    let base = color.strip_suffix(ANIME_SUFFIX).unwrap_or(color);
    match base {
        "disabled" | "notbuilt" => DEFAULT_COLOR,
        other => other,
    }
}

/// Derive a view's colour from its jobs. The worst job wins
/// (red > yellow > aborted > blue > grey) and the `_anime` suffix is kept
/// when any job sharing the winning colour is building.
pub fn aggregate_color(jobs: &[Job]) -> String {
    let Some(worst) = jobs.iter().map(|j| base_color(&j.color)).max_by_key(|c| severity(c)) else {
        return DEFAULT_COLOR.to_string();
    };

    let worst = if severity(worst) == 0 { DEFAULT_COLOR } else { worst };
    let building = jobs
        .iter()
        .any(|j| j.is_building() && severity(base_color(&j.color)) == severity(worst));

    if building {
        format!("{}{}", worst, ANIME_SUFFIX)
    } else {
        worst.to_string()
    }
}
