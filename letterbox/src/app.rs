//! # Letterbox Application Logic
//!
//! Orchestrates the two workflows behind the CLI: the PPO training loop
//! (rollouts, periodic progress logging, reward-curve CSV, weight export)
//! and the single-episode evaluation rollout of an exported policy.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Result;
use ml::{weights, LetterPpoTrainer, Tensor};
use sim::{angle_diff, LetterConfig, LetterSim};

use crate::Command;

/// Dispatch a parsed CLI command.
///
/// # Errors
///
/// Returns any error produced while training, evaluating, or touching the
/// weight/log files.
pub fn run(command: Command) -> Result<()> {
    tracing_subscriber::fmt::init();

    match command {
        Command::Train {
            timesteps,
            envs,
            seed,
            out,
            reward_log,
        } => train(timesteps, envs, seed, &out, &reward_log),
        Command::Eval { weights, seed } => eval(&weights, seed),
    }
}

fn train(timesteps: u64, n_envs: usize, seed: u64, out: &Path, reward_log: &Path) -> Result<()> {
    tracing::info!("Training with {} environments, seed {}...", n_envs, seed);
    let mut trainer = LetterPpoTrainer::new(n_envs, seed);
    let rollout = trainer.rollout_len() as u64;

    let mut collected = 0u64;
    let mut iteration = 0u64;
    let mut history = String::from("timesteps,mean_reward\n");
    while collected < timesteps {
        let mean_reward = trainer.step();
        collected += rollout;
        iteration += 1;
        let _ = writeln!(history, "{collected},{mean_reward}");
        if iteration % 10 == 0 {
            tracing::info!(
                "Iteration {} complete. Steps: {}, mean rollout reward: {:.2}",
                iteration,
                collected,
                mean_reward
            );
        }
    }

    fs::write(reward_log, history)?;
    fs::write(out, weights::to_json(trainer.policy())?)?;
    tracing::info!("Training complete. Weights written to {}", out.display());
    Ok(())
}

fn eval(weights_path: &Path, seed: u64) -> Result<()> {
    let policy = weights::from_json(&fs::read_to_string(weights_path)?)?;
    let mut env = LetterSim::new(LetterConfig::default(), seed);
    let mut obs = env.reset();

    for _ in 0..env.config.max_steps {
        let input = Tensor::from_vec(vec![obs.len()], obs.to_vec());
        let (action, _) = policy.forward(&input);
        let (next_obs, reward, terminated, truncated) =
            env.step([action.data[0], action.data[1]]);

        let angle_err = angle_diff(env.target_theta, env.theta).abs();
        tracing::info!(
            "x={:.2}, target={:.2}, theta={:.2}, theta_err={:.4} rad, reward={:.2}",
            env.x,
            env.target_x,
            env.theta,
            angle_err,
            reward
        );

        obs = next_obs;
        if terminated {
            tracing::info!("Converged after {} steps.", env.step_count);
            break;
        }
        if truncated {
            tracing::info!("Episode truncated after {} steps.", env.step_count);
            break;
        }
    }

    Ok(())
}
