//! # Letterbox
//!
//! Entry point for the letterbox binary.
//!
//! This executable drives the letter slide-and-rotate simulation through
//! its two workflows: training a policy with PPO across a batch of
//! environments, and rolling out a previously exported policy in a single
//! environment with per-step logging.

mod app;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "letterbox", about = "Slide-and-rotate RL training harness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train a policy with PPO and export its weights
    Train {
        /// Total environment steps to collect
        #[arg(long, default_value_t = 1_000_000)]
        timesteps: u64,
        /// Number of independent environments in the rollout batch
        #[arg(long, default_value_t = 16)]
        envs: usize,
        /// Seed for networks, exploration, and environment resets
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Where to write the policy weights
        #[arg(long, default_value = "letter_policy_weights.json")]
        out: PathBuf,
        /// Where to write the reward curve as CSV
        #[arg(long, default_value = "reward_log.csv")]
        reward_log: PathBuf,
    },
    /// Roll out exported policy weights in a single environment
    Eval {
        /// Policy weights to load
        #[arg(long, default_value = "letter_policy_weights.json")]
        weights: PathBuf,
        /// Seed for the evaluation episode
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::run(cli.command)
}
