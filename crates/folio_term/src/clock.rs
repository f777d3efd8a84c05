//! Fixed-rate frame source backed by a tokio interval.

use std::time::Duration;

use folio::schedule::{FrameHandle, FrameScheduler};
use tokio::time::{self, Interval, MissedTickBehavior};

pub struct IntervalScheduler {
    interval: Interval,
    pending: Option<FrameHandle>,
    next_id: u64,
}

impl IntervalScheduler {
    pub fn new(fps: u32) -> Self {
        let period = Duration::from_millis((1000 / fps.max(1)).max(1) as u64);
        let mut interval = time::interval(period);
        // A slow terminal should drop frames, not burst to catch up.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            pending: None,
            next_id: 0,
        }
    }

    /// Wait for the next tick and hand out the pending frame, if any.
    ///
    /// Returns `None` when nothing is scheduled (the loop was stopped).
    pub async fn next_frame(&mut self) -> Option<FrameHandle> {
        self.pending?;
        self.interval.tick().await;
        self.pending.take()
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fires_only_what_was_requested() {
        let mut s = IntervalScheduler::new(1000);
        assert_eq!(s.next_frame().await, None);

        let h = s.request_frame().unwrap();
        assert_eq!(s.next_frame().await, Some(h));
        assert!(s.pending.is_none());

        let h = s.request_frame().unwrap();
        s.cancel_frame(h);
        assert_eq!(s.next_frame().await, None);
    }
}
