//! Proximal Policy Optimization over a batch of independent environments.
//!
//! The trainer owns its environment instances (one episode stream each,
//! never aliased), rolls them for a fixed horizon, estimates advantages
//! with GAE, and updates tanh-MLP policy/value networks with the clipped
//! surrogate objective. Exploration is Gaussian around the policy mean
//! with a fixed standard deviation; evaluation uses the mean directly.

use std::f32::consts::PI;

use crate::env::Env;
use crate::nn::{mlp, Adam, Sequential, Tensor};
use sim::{LetterConfig, LetterSim};

/// Standard normal sample via the Box-Muller transform.
fn normal(rng: &mut fastrand::Rng) -> f32 {
    let u1 = rng.f32().max(1e-7);
    let u2 = rng.f32();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn accumulate(acc: &mut Option<Vec<Tensor>>, grads: Vec<Tensor>) {
    match acc {
        None => *acc = Some(grads),
        Some(sums) => {
            for (sum, g) in sums.iter_mut().zip(&grads) {
                for (s, v) in sum.data.iter_mut().zip(&g.data) {
                    *s += v;
                }
            }
        }
    }
}

/// Generic trainer for the Proximal Policy Optimization (PPO) algorithm.
pub struct PpoTrainer<E: Env> {
    envs: Vec<E>,
    policy: Sequential,
    value: Sequential,
    policy_opt: Adam,
    value_opt: Adam,
    gamma: f32,
    lambda: f32,
    clip: f32,
    action_std: f32,
    t_max: usize,
    n_epochs: usize,
    obs: Vec<Vec<f32>>,
    obs_dim: usize,
    act_dim: usize,
    rng: fastrand::Rng,
}

impl<E: Env> PpoTrainer<E> {
    /// Creates a trainer over `n_envs` environments built by `make_env`
    /// (called with each instance index, so environments can be seeded
    /// independently).
    pub fn new_with(mut make_env: impl FnMut(usize) -> E, n_envs: usize, seed: u64) -> Self {
        assert!(n_envs > 0, "need at least one environment");
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut envs: Vec<E> = (0..n_envs).map(&mut make_env).collect();
        let obs_dim = envs[0].obs_size();
        let act_dim = envs[0].action_size();

        let policy = mlp(&[obs_dim, 64, 64, act_dim], &mut rng);
        let value = mlp(&[obs_dim, 64, 64, 1], &mut rng);
        let obs: Vec<Vec<f32>> = envs.iter_mut().map(Env::reset).collect();

        Self {
            envs,
            policy,
            value,
            policy_opt: Adam::new(3e-4),
            value_opt: Adam::new(3e-4),
            gamma: 0.99,
            lambda: 0.95,
            clip: 0.2,
            action_std: 0.3,
            t_max: 64,
            n_epochs: 4,
            obs,
            obs_dim,
            act_dim,
            rng,
        }
    }

    /// Environment steps collected per training iteration.
    pub fn rollout_len(&self) -> usize {
        self.t_max * self.envs.len()
    }

    /// The current policy network.
    pub fn policy(&self) -> &Sequential {
        &self.policy
    }

    /// Performs a single training iteration: one rollout across every
    /// environment followed by the PPO update epochs. Returns the mean
    /// per-environment reward accumulated over the rollout.
    pub fn step(&mut self) -> f32 {
        let n = self.envs.len();
        let mut all_obs = Vec::with_capacity(self.t_max);
        let mut all_actions = Vec::with_capacity(self.t_max);
        let mut all_log_probs = Vec::with_capacity(self.t_max);
        let mut all_rewards = Vec::with_capacity(self.t_max);
        let mut all_dones = Vec::with_capacity(self.t_max);
        let mut all_values = Vec::with_capacity(self.t_max);
        let mut total_rewards = vec![0.0f32; n];

        for _ in 0..self.t_max {
            all_obs.push(self.obs.clone());

            let mut actions_t = Vec::with_capacity(n);
            let mut log_probs_t = Vec::with_capacity(n);
            let mut values_t = Vec::with_capacity(n);
            for i in 0..n {
                let x = Tensor::from_vec(vec![self.obs_dim], self.obs[i].clone());
                let (mean, _) = self.policy.forward(&x);
                let (value, _) = self.value.forward(&x);

                let mut action = vec![0.0f32; self.act_dim];
                let mut log_prob = 0.0f32;
                for j in 0..self.act_dim {
                    let noise = self.action_std * normal(&mut self.rng);
                    action[j] = mean.data[j] + noise;
                    log_prob -= 0.5 * noise * noise / (self.action_std * self.action_std);
                }
                actions_t.push(action);
                log_probs_t.push(log_prob);
                values_t.push(value.data[0]);
            }

            let mut rewards_t = Vec::with_capacity(n);
            let mut dones_t = Vec::with_capacity(n);
            for i in 0..n {
                let (next_obs, reward, terminated, truncated) =
                    self.envs[i].step(&actions_t[i]);
                total_rewards[i] += reward;
                let done = terminated || truncated;
                rewards_t.push(reward);
                dones_t.push(done);
                self.obs[i] = if done { self.envs[i].reset() } else { next_obs };
            }

            all_actions.push(actions_t);
            all_log_probs.push(log_probs_t);
            all_values.push(values_t);
            all_rewards.push(rewards_t);
            all_dones.push(dones_t);
        }

        // bootstrap from the value of the observation after the rollout
        let mut last_values = Vec::with_capacity(n);
        for i in 0..n {
            let x = Tensor::from_vec(vec![self.obs_dim], self.obs[i].clone());
            let (value, _) = self.value.forward(&x);
            last_values.push(value.data[0]);
        }

        let mut advantages = vec![vec![0.0f32; n]; self.t_max];
        let mut returns = vec![vec![0.0f32; n]; self.t_max];
        let mut last_advantage = vec![0.0f32; n];
        for t in (0..self.t_max).rev() {
            for i in 0..n {
                let next_value = if t == self.t_max - 1 {
                    last_values[i]
                } else {
                    all_values[t + 1][i]
                };
                // an episode boundary after step t cuts both the bootstrap
                // and the lambda chain
                let mask = if all_dones[t][i] { 0.0 } else { 1.0 };
                let delta =
                    all_rewards[t][i] + self.gamma * next_value * mask - all_values[t][i];
                advantages[t][i] =
                    delta + self.gamma * self.lambda * last_advantage[i] * mask;
                last_advantage[i] = advantages[t][i];
                returns[t][i] = advantages[t][i] + all_values[t][i];
            }
        }

        let flat: Vec<f32> = advantages.iter().flatten().copied().collect();
        let mean_adv = flat.iter().sum::<f32>() / flat.len() as f32;
        let std_adv = (flat.iter().map(|a| (a - mean_adv).powi(2)).sum::<f32>()
            / flat.len() as f32)
            .sqrt();
        let advantages_norm: Vec<f32> =
            flat.iter().map(|a| (a - mean_adv) / (std_adv + 1e-8)).collect();

        let count = (self.t_max * n) as f32;
        let var = self.action_std * self.action_std;
        for _ in 0..self.n_epochs {
            let mut policy_grads: Option<Vec<Tensor>> = None;
            let mut value_grads: Option<Vec<Tensor>> = None;

            for t in 0..self.t_max {
                for i in 0..n {
                    let x = Tensor::from_vec(vec![self.obs_dim], all_obs[t][i].clone());
                    let (mean, acts) = self.policy.forward(&x);

                    let mut log_prob = 0.0f32;
                    for j in 0..self.act_dim {
                        let d = all_actions[t][i][j] - mean.data[j];
                        log_prob -= 0.5 * d * d / var;
                    }

                    let adv = advantages_norm[t * n + i];
                    let ratio = (log_prob - all_log_probs[t][i]).exp();
                    let clipped = ratio.clamp(1.0 - self.clip, 1.0 + self.clip);

                    // gradient flows only while the unclipped surrogate is
                    // the active minimum
                    let mut grad = Tensor::zeros(vec![self.act_dim]);
                    if ratio * adv <= clipped * adv {
                        for j in 0..self.act_dim {
                            let d = all_actions[t][i][j] - mean.data[j];
                            grad.data[j] = -adv * ratio * d / var / count;
                        }
                    }
                    let (_, pgrads) = self.policy.backward(&acts, &grad);
                    accumulate(&mut policy_grads, pgrads);

                    let (value, vacts) = self.value.forward(&x);
                    let dv = 2.0 * (value.data[0] - returns[t][i]) / count;
                    let vgrad = Tensor::from_vec(vec![1], vec![dv]);
                    let (_, vgrads) = self.value.backward(&vacts, &vgrad);
                    accumulate(&mut value_grads, vgrads);
                }
            }

            if let Some(grads) = policy_grads {
                let params = self.policy.params_mut();
                let mut pairs: Vec<(&mut Tensor, &Tensor)> =
                    params.into_iter().zip(grads.iter()).collect();
                self.policy_opt.step(&mut pairs);
            }
            if let Some(grads) = value_grads {
                let params = self.value.params_mut();
                let mut pairs: Vec<(&mut Tensor, &Tensor)> =
                    params.into_iter().zip(grads.iter()).collect();
                self.value_opt.step(&mut pairs);
            }
        }

        total_rewards.iter().sum::<f32>() / n as f32
    }

    /// Deterministic action (the policy mean) for the provided observation.
    pub fn act(&self, obs: &[f32]) -> Vec<f32> {
        assert_eq!(obs.len(), self.obs_dim);
        let x = Tensor::from_vec(vec![self.obs_dim], obs.to_vec());
        let (mean, _) = self.policy.forward(&x);
        mean.data
    }
}

pub type LetterPpoTrainer = PpoTrainer<LetterSim>;

impl PpoTrainer<LetterSim> {
    /// Convenience constructor for the letter slide-and-rotate task.
    pub fn new(n_envs: usize, seed: u64) -> Self {
        Self::new_with(
            |i| LetterSim::new(LetterConfig::default(), seed.wrapping_add(i as u64 + 1)),
            n_envs,
            seed,
        )
    }
}
