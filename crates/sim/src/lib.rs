#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Letterbox Simulation Core
//!
//! Planar slide-and-rotate dynamics for a single letter body, exposed as a
//! reinforcement-learning environment: the agent must translate to a target
//! horizontal position and rotate to a target heading using two continuous
//! control inputs per fixed timestep.
//!
//! ## Key Components
//!
//! -   **State:** [`LetterSim`] owns one episode's kinematic state (position,
//!     velocity, heading, angular velocity, targets, step counter) together
//!     with an explicitly seeded random source for episode initialization.
//! -   **Dynamics:** [`LetterSim::step`] applies the control mapping, a
//!     semi-implicit Euler update with per-step friction damping, shaped
//!     reward, and termination/truncation checks.
//! -   **Configuration:** [`LetterConfig`] carries the fixed physics
//!     constants (timestep, force/torque scales, friction, episode length).
//!
//! The crate performs no learning and no I/O; training drivers consume it
//! solely through `reset`/`step`.
//!
//! ## Usage
//!
//! ```rust
//! use sim::{LetterConfig, LetterSim};
//!
//! let mut env = LetterSim::new(LetterConfig::default(), 42);
//! let mut obs = env.reset();
//! assert_eq!(obs.len(), 4);
//! loop {
//!     let (next_obs, _reward, terminated, truncated) = env.step([1.0, 0.0]);
//!     obs = next_obs;
//!     if terminated || truncated {
//!         break;
//!     }
//! }
//! assert!(obs.iter().all(|c| (-1.0..=1.0).contains(c)));
//! ```

pub mod letter;
pub mod types;

pub use letter::{angle_diff, LetterSim};
pub use types::{Action, LetterConfig, Observation, ACTION_DIM, OBS_DIM};
