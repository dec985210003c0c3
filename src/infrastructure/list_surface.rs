// List surface published to HTTP readers through a watch channel
use crate::application::host::ListSurface;
use crate::domain::list_row::ListRow;
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListSnapshot {
    pub rows: Vec<ListRow>,
    pub last_poll_time: Option<String>,
    /// Views plus all cached jobs, including collapsed ones
    pub row_count: usize,
}

/// Rows are staged while a render appends them and published as one
/// snapshot on `present`, so readers never see a half-drawn list.
pub struct SharedListSurface {
    staged: Vec<ListRow>,
    last_poll_time: Option<String>,
    tx: watch::Sender<ListSnapshot>,
}

impl SharedListSurface {
    pub fn new() -> (Self, watch::Receiver<ListSnapshot>) {
        let (tx, rx) = watch::channel(ListSnapshot::default());
        let surface = Self {
            staged: Vec::new(),
            last_poll_time: None,
            tx,
        };
        (surface, rx)
    }
}

impl ListSurface for SharedListSurface {
    fn remove_all_elements(&mut self) {
        self.staged.clear();
    }

    fn append_element(&mut self, row: ListRow) {
        self.staged.push(row);
    }

    fn set_last_poll_time(&mut self, stamp: String) {
        self.last_poll_time = Some(stamp.clone());
        self.tx.send_modify(|snapshot| snapshot.last_poll_time = Some(stamp));
    }

    fn present(&mut self, row_count: usize) {
        let snapshot = ListSnapshot {
            rows: self.staged.clone(),
            last_poll_time: self.last_poll_time.clone(),
            row_count,
        };
        self.tx.send_replace(snapshot);
    }
}
