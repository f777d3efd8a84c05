//! The looping cart-pole widget: simulate, draw, reschedule.

use folio::prng::RandomSource;
use folio::schedule::{FrameScheduler, RunLoop};
use folio::surface::Surface;

use crate::cartpole::{CartPole, CartPoleParams, StepOutcome};
use crate::render::CartPoleView;

/// Cart-pole simulation bound to a frame scheduler and a randomness source.
///
/// Hosts call [`CartPoleAnimation::on_frame`] from their frame callback. Tests
/// drive the same type with a `ManualScheduler`.
pub struct CartPoleAnimation<S, R> {
    sim: CartPole,
    run: RunLoop<S>,
    rng: R,
    average_window: usize,
}

impl<S: FrameScheduler, R: RandomSource> CartPoleAnimation<S, R> {
    pub fn new(params: CartPoleParams, scheduler: S, mut rng: R, average_window: usize) -> Self {
        let sim = CartPole::new(params, &mut rng);
        Self {
            sim,
            run: RunLoop::new(scheduler),
            rng,
            average_window: average_window.max(1),
        }
    }

    pub fn sim(&self) -> &CartPole {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut CartPole {
        &mut self.sim
    }

    pub fn run_loop(&self) -> &RunLoop<S> {
        &self.run
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.run.scheduler_mut()
    }

    pub fn average_window(&self) -> usize {
        self.average_window
    }

    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    pub fn start(&mut self) -> bool {
        self.run.start()
    }

    pub fn stop(&mut self) {
        self.run.stop()
    }

    pub fn toggle(&mut self) -> bool {
        self.run.toggle()
    }

    /// One simulation step plus a redraw, without touching the scheduler.
    pub fn advance(&mut self, surface: &mut impl Surface) -> StepOutcome {
        let out = self.sim.step(&mut self.rng);
        self.draw(surface);
        out
    }

    /// Redraw the current state.
    pub fn draw(&self, surface: &mut impl Surface) {
        let (w, h) = surface.size();
        CartPoleView::new(w, h, self.sim.params.track_limit).draw(
            surface,
            &self.sim,
            self.average_window,
        );
    }

    /// Host frame callback: step, render, then request the next frame if
    /// still running.
    ///
    /// A frame already in flight when `stop` is called still completes its
    /// render but schedules nothing.
    pub fn on_frame(&mut self, surface: &mut impl Surface) -> StepOutcome {
        let out = self.advance(surface);
        self.run.frame_fired();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::prng::Prng;
    use folio::schedule::{ManualScheduler, RunState};
    use folio::surface::DrawList;

    fn anim() -> CartPoleAnimation<ManualScheduler, Prng> {
        CartPoleAnimation::new(
            CartPoleParams::default(),
            ManualScheduler::new(),
            Prng::new(21),
            10,
        )
    }

    #[test]
    fn new_animation_is_stopped() {
        let a = anim();
        assert!(!a.is_running());
        assert_eq!(a.run_loop().state(), RunState::Stopped);
        assert_eq!(a.run_loop().scheduler().requests(), 0);
    }

    #[test]
    fn double_start_runs_a_single_loop() {
        let mut a = anim();
        a.start();
        let once = a.run_loop().state();
        a.start();
        assert_eq!(a.run_loop().state(), once);
        assert_eq!(a.run_loop().scheduler().requests(), 1);
    }

    #[test]
    fn frames_step_and_reschedule_while_running() {
        let mut a = anim();
        let mut dl = DrawList::new(600.0, 300.0);
        a.start();
        for i in 1..=10u32 {
            assert!(a.scheduler_mut().fire().is_some());
            a.on_frame(&mut dl);
            assert_eq!(a.sim().timestep(), i);
        }
        assert!(a.is_running());
        assert_eq!(a.run_loop().scheduler().requests(), 11);
        assert!(dl.texts().any(|t| t == "Timestep: 10"));
    }

    #[test]
    fn stop_during_frame_renders_but_does_not_reschedule() {
        let mut a = anim();
        let mut dl = DrawList::new(600.0, 300.0);
        a.start();
        a.scheduler_mut().fire();
        a.stop();
        a.on_frame(&mut dl);
        assert!(!a.is_running());
        assert_eq!(a.sim().timestep(), 1);
        assert!(a.run_loop().scheduler().pending().is_none());
        assert!(!dl.commands().is_empty());

        let before = a.run_loop().scheduler().cancels();
        a.stop();
        assert_eq!(a.run_loop().scheduler().cancels(), before);
    }

    #[test]
    fn episode_end_shows_up_on_the_hud() {
        let mut a = anim();
        let mut dl = DrawList::new(600.0, 300.0);
        a.sim_mut().set_pole_angle(0.0);
        let mut ended = false;
        for _ in 0..a.sim().params.max_steps {
            if let StepOutcome::EpisodeEnded { .. } = a.advance(&mut dl) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert!(dl.texts().any(|t| t == "Episode: 2"));
        assert!(dl.texts().any(|t| t == "Timestep: 0"));
        assert_eq!(a.sim().cart_position(), 0.0);
    }
}
