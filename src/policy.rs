//! Action-selection policies for episode sampling.

use rand::rngs::StdRng;
use rand::Rng;

use crate::types::{Action, StateId};

/// Selects an action among those legal at a state.
///
/// Used by the [`EpisodeSampler`](crate::solvers::episode::EpisodeSampler)
/// as the behavior policy for Q-learning and Monte Carlo evaluation. The
/// sampler guarantees `actions` is non-empty.
pub trait ActionPolicy {
    /// Selects one action for `state` from the legal set `actions`.
    ///
    /// `actions` is sorted in ascending label order; implementations needing
    /// randomness draw from `rng` so that a seeded run is reproducible.
    fn select(&mut self, state: StateId, actions: &[Action], rng: &mut StdRng) -> Action;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}

/// Uniformly random action selection.
///
/// The fixed exploration rule of both sampling solvers: every legal action
/// is equally likely, independent of any value estimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomPolicy;

impl UniformRandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ActionPolicy for UniformRandomPolicy {
    fn select(&mut self, _state: StateId, actions: &[Action], rng: &mut StdRng) -> Action {
        actions[rng.gen_range(0..actions.len())]
    }

    fn name(&self) -> &str {
        "uniform-random"
    }
}
