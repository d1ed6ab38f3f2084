//! Letter body entity for reinforcement learning environments
//!
//! This module provides the single-body planar simulation: a letter that
//! slides along one axis toward a target position while rotating toward a
//! target heading. Both control channels are continuous and applied once
//! per fixed timestep.

use std::f32::consts::PI;

use crate::types::{Action, LetterConfig, Observation};

/// Wrapped angular difference `target - current`.
///
/// Computes `((target - current + π) mod 2π) - π` with a Euclidean
/// remainder, so the result is well-defined for negative operands and lies
/// in [-π, π).
#[must_use]
pub fn angle_diff(target: f32, current: f32) -> f32 {
    (target - current + PI).rem_euclid(2.0 * PI) - PI
}

fn uniform(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.f32()
}

/// A letter body in the slide-and-rotate task.
///
/// State fields are public so drivers and tests can inspect them; targets
/// are fixed for the lifetime of an episode and only change on
/// [`reset`](LetterSim::reset).
pub struct LetterSim {
    /// Physics constants for this instance
    pub config: LetterConfig,
    /// Current position along the slide axis
    pub x: f32,
    /// Current velocity along the slide axis
    pub v: f32,
    /// Target position for the episode
    pub target_x: f32,
    /// Current heading in radians
    pub theta: f32,
    /// Current angular velocity
    pub omega: f32,
    /// Target heading for the episode
    pub target_theta: f32,
    /// Steps elapsed since the last reset
    pub step_count: u32,
    /// Absolute position error at the end of the previous step
    pub last_dist: f32,
    /// Absolute heading error at the end of the previous step
    pub last_angle_dist: f32,
    rng: fastrand::Rng,
}

impl LetterSim {
    /// Create a letter simulation with its own seeded random source.
    ///
    /// The state is zeroed; call [`reset`](LetterSim::reset) before
    /// stepping.
    #[must_use]
    pub fn new(config: LetterConfig, seed: u64) -> Self {
        Self {
            config,
            x: 0.0,
            v: 0.0,
            target_x: 0.0,
            theta: 0.0,
            omega: 0.0,
            target_theta: 0.0,
            step_count: 0,
            last_dist: 0.0,
            last_angle_dist: 0.0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Start a new episode: random start position and heading, random
    /// target position, heading target at zero, velocities zeroed.
    pub fn reset(&mut self) -> Observation {
        self.x = uniform(&mut self.rng, -2.0, 2.0);
        self.v = 0.0;
        self.target_x = uniform(&mut self.rng, -2.0, 2.0);

        self.theta = uniform(&mut self.rng, -PI, PI);
        self.omega = 0.0;
        self.target_theta = 0.0;

        self.step_count = 0;
        self.last_dist = (self.target_x - self.x).abs();
        self.last_angle_dist = angle_diff(self.target_theta, self.theta).abs();

        self.observation()
    }

    /// Advance the simulation by one action.
    ///
    /// Returns `(observation, reward, terminated, truncated)`. The slide
    /// channel only modulates push strength: the applied force always
    /// points at the target, so `action[0]`'s sign is ignored. Out-of-range
    /// actions are tolerated, never validated.
    pub fn step(&mut self, action: Action) -> (Observation, f32, bool, bool) {
        self.step_count += 1;

        let pos_error = self.target_x - self.x;
        let slide_dir = if pos_error > 0.0 {
            1.0
        } else if pos_error < 0.0 {
            -1.0
        } else {
            0.0
        };
        let force = slide_dir * action[0].abs() * self.config.max_force;

        let rot_error = angle_diff(self.target_theta, self.theta);
        let mut torque = action[1] * self.config.max_torque;

        // taper torque to zero near the heading target to avoid overshoot
        if rot_error.abs() < 0.1 {
            torque *= rot_error.abs() / 0.1;
        }

        self.v += force * self.config.dt;
        self.v *= self.config.linear_friction;
        self.x += self.v * self.config.dt;

        self.omega += torque * self.config.dt;
        self.omega *= self.config.angular_friction;
        self.theta += self.omega * self.config.dt;

        // errors as seen at the top of the step, before integration
        let dist = pos_error.abs();
        let angle_dist = rot_error.abs();

        let angle_progress = self.last_angle_dist - angle_dist;
        self.last_angle_dist = angle_dist;

        let progress = self.last_dist - dist;
        self.last_dist = dist;

        let mut reward = -dist - 0.2 * dist * dist - 0.5 * angle_dist
            - 0.1 * self.v.abs()
            - 0.05 * self.omega.abs()
            + 2.0 * progress
            + 1.5 * angle_progress;

        let terminated = dist < 0.05
            && angle_dist < 0.02
            && self.v.abs() < 0.05
            && self.omega.abs() < 0.05;

        if terminated {
            reward += 10.0;
        }

        let truncated = self.step_count >= self.config.max_steps;

        (self.observation(), reward, terminated, truncated)
    }

    /// The normalized observation for the current state, every component
    /// clamped to [-1, 1]. Raw state stays available on the struct; only
    /// the observation saturates.
    #[must_use]
    pub fn observation(&self) -> Observation {
        [
            ((self.target_x - self.x) / 5.0).clamp(-1.0, 1.0),
            (self.v * 0.2).clamp(-1.0, 1.0),
            (angle_diff(self.target_theta, self.theta) / PI).clamp(-1.0, 1.0),
            (self.omega * 0.2).clamp(-1.0, 1.0),
        ]
    }
}
