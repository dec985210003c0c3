// Host capabilities the monitor core is driven through
use crate::domain::list_row::ListRow;
use std::time::Duration;

pub trait NetworkStatus: Send + Sync {
    fn is_online(&self) -> bool;
}

/// The visible list. A render clears it, appends every row, then presents.
pub trait ListSurface: Send {
    fn remove_all_elements(&mut self);

    fn append_element(&mut self, row: ListRow);

    fn set_last_poll_time(&mut self, stamp: String);

    /// Called once a full render has been appended. `row_count` counts every
    /// view and cached job, collapsed or not, and sizes the scroll area.
    fn present(&mut self, _row_count: usize) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Single-shot timers. When a timer fires the host delivers a tick carrying
/// its handle back to the monitor.
pub trait Timer: Send {
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    fn clear_timeout(&mut self, handle: TimerHandle);
}
