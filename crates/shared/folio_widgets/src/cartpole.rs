//! Cart-pole toy simulation.
//!
//! Coordinate system:
//! - `cart_position` in `[-track_limit, track_limit]`, `0` is track center
//! - `pole_angle` in radians, `0` is upright, positive leans right
//!
//! The controller is a coin flip and the dynamics are a linearized
//! (small-angle) single-step update with no velocity carried between frames.
//! The "self-correction" damping is scripted, not learned.

use folio::prng::RandomSource;
use serde::{Deserialize, Serialize};

use crate::stats::EpisodeLog;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartPoleParams {
    pub gravity: f32,
    pub cart_mass: f32,
    pub pole_mass: f32,
    /// Distance from pivot to the pole's center of mass.
    pub pole_half_length: f32,
    pub force_mag: f32,
    /// Integration step (seconds).
    pub dt: f32,
    pub track_limit: f32,
    /// Episode ends once `|pole_angle|` exceeds this (radians).
    pub angle_limit: f32,
    /// Episode ends once it has lasted this many steps.
    pub max_steps: u32,
    pub damping_threshold: f32,
    pub damping_factor: f32,
    /// Reset angle is drawn uniformly from `[-reset_jitter, reset_jitter]`.
    pub reset_jitter: f32,
}

impl Default for CartPoleParams {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 1.0,
            pole_mass: 0.1,
            pole_half_length: 0.5,
            force_mag: 10.0,
            dt: 0.05,
            track_limit: 2.4,
            angle_limit: 45.0_f32.to_radians(),
            max_steps: 500,
            damping_threshold: 0.1,
            damping_factor: 0.95,
            reset_jitter: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushAction {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    PoleFell,
    TimeLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    Continue,
    EpisodeEnded { score: u32, reason: EndReason },
}

/// HUD/diagnostics view of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartPoleSnapshot {
    pub episode: u32,
    pub timestep: u32,
    pub cart_position: f32,
    pub pole_angle: f32,
    pub last_action: Option<PushAction>,
    pub trailing_average: f32,
    pub best: u32,
}

#[derive(Debug, Clone)]
pub struct CartPole {
    pub params: CartPoleParams,
    cart_position: f32,
    pole_angle: f32,
    timestep: u32,
    episode: u32,
    last_action: Option<PushAction>,
    log: EpisodeLog,
}

impl CartPole {
    pub fn new(params: CartPoleParams, rng: &mut impl RandomSource) -> Self {
        let mut sim = Self {
            params,
            cart_position: 0.0,
            pole_angle: 0.0,
            timestep: 0,
            episode: 1,
            last_action: None,
            log: EpisodeLog::new(),
        };
        sim.reset_episode(rng);
        sim
    }

    pub fn cart_position(&self) -> f32 {
        self.cart_position
    }

    pub fn pole_angle(&self) -> f32 {
        self.pole_angle
    }

    pub fn timestep(&self) -> u32 {
        self.timestep
    }

    /// Current episode number, starting at 1.
    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn last_action(&self) -> Option<PushAction> {
        self.last_action
    }

    pub fn log(&self) -> &EpisodeLog {
        &self.log
    }

    /// Scripted start angle (demos and tests).
    pub fn set_pole_angle(&mut self, angle: f32) {
        self.pole_angle = angle;
    }

    pub fn snapshot(&self, average_window: usize) -> CartPoleSnapshot {
        CartPoleSnapshot {
            episode: self.episode,
            timestep: self.timestep,
            cart_position: self.cart_position,
            pole_angle: self.pole_angle,
            last_action: self.last_action,
            trailing_average: self.log.trailing_average(average_window),
            best: self.log.best(),
        }
    }

    /// Cart back to center, pole near upright. Does not touch the counters.
    fn reset_episode(&mut self, rng: &mut impl RandomSource) {
        let j = self.params.reset_jitter;
        self.cart_position = 0.0;
        self.pole_angle = rng.gen_range_f32(-j, j);
        self.timestep = 0;
    }

    /// Advance one frame with a random push.
    pub fn step(&mut self, rng: &mut impl RandomSource) -> StepOutcome {
        let action = if rng.coin() {
            PushAction::Right
        } else {
            PushAction::Left
        };
        self.step_with(action, rng)
    }

    /// Advance one frame with a chosen push. `rng` is only used to re-randomize
    /// the pole when the episode ends.
    pub fn step_with(&mut self, action: PushAction, rng: &mut impl RandomSource) -> StepOutcome {
        let p = self.params;
        self.last_action = Some(action);

        let force = match action {
            PushAction::Right => p.force_mag,
            PushAction::Left => -p.force_mag,
        };

        // Small-angle form: sin(theta) ~ theta, cos(theta) ~ 1.
        let total_mass = p.cart_mass + p.pole_mass;
        let theta = self.pole_angle;
        let denom = p.pole_half_length * (4.0 / 3.0 - p.pole_mass / total_mass);
        let theta_acc = (p.gravity * theta - force / total_mass) / denom;
        let x_acc = (force - p.pole_mass * p.pole_half_length * theta_acc) / total_mass;

        let dt2 = p.dt * p.dt;
        self.pole_angle += theta_acc * dt2;
        self.cart_position += x_acc * dt2;

        if self.pole_angle.abs() > p.damping_threshold {
            self.pole_angle *= p.damping_factor;
        }

        self.cart_position = self.cart_position.clamp(-p.track_limit, p.track_limit);
        self.timestep += 1;

        let reason = if self.pole_angle.abs() > p.angle_limit {
            Some(EndReason::PoleFell)
        } else if self.timestep >= p.max_steps {
            Some(EndReason::TimeLimit)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                let score = self.timestep;
                self.log.record(score);
                self.episode += 1;
                self.reset_episode(rng);
                StepOutcome::EpisodeEnded { score, reason }
            }
            None => StepOutcome::Continue,
        }
    }
}
