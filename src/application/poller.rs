// Poller traits for refreshing a view's job statuses
use crate::domain::view::View;
use async_trait::async_trait;

#[async_trait]
pub trait Poller: Send + Sync {
    /// Fetch the current colour and jobs for `view`. The returned view keeps
    /// the input's id and url.
    async fn refresh(&self, view: &View) -> anyhow::Result<View>;
}

/// Fire-and-forget submission of a view for refreshing.
///
/// Successful refreshes come back to the monitor as completions; failed ones
/// never do.
pub trait PollQueue: Send {
    fn submit(&self, view: View);
}
