use sim::LetterSim;

/// Reinforcement learning environment trait.
///
/// Inspired by classic frameworks like OpenAI Gym, this trait defines the
/// core interface an environment must provide. Each call to [`step`]
/// advances the simulation by one action and returns the new observation
/// vector, a reward signal, and the terminated/truncated episode flags.
///
/// [`step`]: Env::step
pub trait Env {
    /// Advance the environment by one action.
    ///
    /// Returns `(obs, reward, terminated, truncated)`. `terminated` means
    /// the task's convergence predicate was satisfied; `truncated` means
    /// the step limit was hit.
    fn step(&mut self, action: &[f32]) -> (Vec<f32>, f32, bool, bool);

    /// Reset the environment to a fresh episode and return the initial
    /// observation vector.
    fn reset(&mut self) -> Vec<f32>;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize;

    /// Size of the action space.
    fn action_size(&self) -> usize;
}

impl Env for LetterSim {
    /// Panics if `action` has fewer than two components; a wrong-shape
    /// action is a caller bug, not a runtime condition.
    fn step(&mut self, action: &[f32]) -> (Vec<f32>, f32, bool, bool) {
        let (obs, reward, terminated, truncated) =
            LetterSim::step(self, [action[0], action[1]]);
        (obs.to_vec(), reward, terminated, truncated)
    }

    fn reset(&mut self) -> Vec<f32> {
        LetterSim::reset(self).to_vec()
    }

    fn obs_size(&self) -> usize {
        sim::OBS_DIM
    }

    fn action_size(&self) -> usize {
        sim::ACTION_DIM
    }
}
