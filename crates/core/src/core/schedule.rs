//! Frame scheduling and the Running/Stopped loop state machine.
//!
//! Hosts own the clock. In the browser that is `requestAnimationFrame`; in the
//! terminal host it is a tokio interval; in tests it is [`ManualScheduler`],
//! which lets a harness fire frames one at a time.

/// Opaque id of one scheduled host frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The "schedule next step" capability a host provides.
pub trait FrameScheduler {
    /// Ask the host for one more frame callback.
    ///
    /// `None` means the host could not schedule (for example, no window).
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Drop a frame that has been requested but has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running(FrameHandle),
}

/// Drives a per-frame callback through a [`FrameScheduler`].
///
/// At most one frame is pending at any time; starting twice never spawns a
/// second loop.
#[derive(Debug)]
pub struct RunLoop<S> {
    scheduler: S,
    state: RunState,
}

impl<S: FrameScheduler> RunLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: RunState::Stopped,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running(_))
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Stopped -> Running. No-op when already running.
    ///
    /// Returns `true` if the loop is running afterwards.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return true;
        }
        match self.scheduler.request_frame() {
            Some(handle) => {
                self.state = RunState::Running(handle);
                true
            }
            None => false,
        }
    }

    /// Running -> Stopped, cancelling the pending frame. No-op when stopped.
    pub fn stop(&mut self) {
        if let RunState::Running(handle) = self.state {
            self.scheduler.cancel_frame(handle);
            self.state = RunState::Stopped;
        }
    }

    /// Start when stopped, stop when running. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop();
            false
        } else {
            self.start()
        }
    }

    /// Called by the host once the pending frame callback has run its work.
    ///
    /// Requests the next frame when the loop is still running. A frame that
    /// fires after [`RunLoop::stop`] schedules nothing. Returns whether a new
    /// frame was requested.
    pub fn frame_fired(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        match self.scheduler.request_frame() {
            Some(handle) => {
                self.state = RunState::Running(handle);
                true
            }
            None => {
                self.state = RunState::Stopped;
                false
            }
        }
    }
}

/// Synchronous scheduler for tests and headless runs.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
    requests: u64,
    cancels: u64,
    unavailable: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose host has no frame source; every request fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }

    pub fn cancels(&self) -> u64 {
        self.cancels
    }

    /// Make later requests fail (or succeed again), as when the host loses
    /// its frame source mid-run.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Consume the pending frame, as the host clock would when it fires.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if self.unavailable {
            return None;
        }
        self.requests += 1;
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancels += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut lp = RunLoop::new(ManualScheduler::new());
        assert!(lp.start());
        let first = lp.state();
        assert!(lp.start());
        assert_eq!(lp.state(), first);
        assert_eq!(lp.scheduler().requests(), 1);
    }

    #[test]
    fn stop_when_stopped_changes_nothing() {
        let mut lp = RunLoop::new(ManualScheduler::new());
        lp.stop();
        assert_eq!(lp.state(), RunState::Stopped);
        assert_eq!(lp.scheduler().cancels(), 0);
        assert_eq!(lp.scheduler().requests(), 0);
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let mut lp = RunLoop::new(ManualScheduler::new());
        lp.start();
        assert!(lp.scheduler().pending().is_some());
        lp.stop();
        assert!(!lp.is_running());
        assert!(lp.scheduler().pending().is_none());
        assert_eq!(lp.scheduler().cancels(), 1);
    }

    #[test]
    fn each_frame_schedules_exactly_one_more() {
        let mut lp = RunLoop::new(ManualScheduler::new());
        lp.start();
        for _ in 0..5 {
            assert!(lp.scheduler_mut().fire().is_some());
            assert!(lp.frame_fired());
            assert!(lp.scheduler().pending().is_some());
        }
        assert_eq!(lp.scheduler().requests(), 6);
    }

    #[test]
    fn in_flight_frame_after_stop_does_not_reschedule() {
        let mut lp = RunLoop::new(ManualScheduler::new());
        lp.start();
        lp.scheduler_mut().fire();
        // Stop arrives while the fired frame is still doing its work.
        lp.stop();
        assert!(!lp.frame_fired());
        assert!(lp.scheduler().pending().is_none());
        assert_eq!(lp.scheduler().requests(), 1);
    }

    #[test]
    fn unavailable_host_stays_stopped() {
        let mut lp = RunLoop::new(ManualScheduler::unavailable());
        assert!(!lp.start());
        assert_eq!(lp.state(), RunState::Stopped);
    }

    #[test]
    fn losing_the_frame_source_mid_run_stops_the_loop() {
        let mut lp = RunLoop::new(ManualScheduler::new());
        assert!(lp.start());
        assert!(lp.scheduler_mut().fire().is_some());
        assert!(lp.frame_fired());

        assert!(lp.scheduler_mut().fire().is_some());
        lp.scheduler_mut().set_unavailable(true);
        assert!(!lp.frame_fired());
        assert_eq!(lp.state(), RunState::Stopped);
        assert!(lp.scheduler().pending().is_none());

        lp.scheduler_mut().set_unavailable(false);
        assert!(lp.start());
    }

    #[test]
    fn toggle_flips_state() {
        let mut lp = RunLoop::new(ManualScheduler::new());
        assert!(lp.toggle());
        assert!(!lp.toggle());
        assert!(!lp.is_running());
    }
}
