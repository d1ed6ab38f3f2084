//! # Letterbox Learning Stack
//!
//! Networks, optimizer, and the PPO training driver for the letter
//! slide-and-rotate task. The simulation engine itself lives in the `sim`
//! crate and is consumed here purely through the [`Env`] seam; this crate
//! adds everything a training run needs on top of it: a small CPU
//! neural-network toolkit with manual backward passes, a vectorized PPO
//! trainer, and JSON import/export of trained policy weights.

pub mod env;
pub mod nn;
pub mod ppo;
pub mod weights;

pub use env::Env;
pub use nn::{mlp, Adam, Dense, Layer, Sequential, TanhAct, Tensor};
pub use ppo::{LetterPpoTrainer, PpoTrainer};
