//! Model-free temporal-difference control over sampled episodes.

use std::collections::BTreeMap;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::episode::EpisodeSampler;
use crate::graph::{GraphError, StateGraph};
use crate::policy::UniformRandomPolicy;
use crate::types::{Action, StateId};

/// Configuration for [`QLearning`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QLearningConfig {
    /// Discount factor γ applied to the bootstrapped successor value.
    pub discount_factor: f64,
    /// Initial learning rate α.
    pub learning_rate: f64,
    /// Multiplier applied to α after every completed episode. No floor is
    /// enforced; callers wanting one must add it.
    pub learning_rate_decay: f64,
    /// Stop once an episode's maximum absolute Q-value change is at or
    /// below this.
    pub threshold: f64,
    /// Maximum number of episodes. Reaching the cap does not guarantee the
    /// greedy policy is optimal.
    pub max_episodes: u32,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            discount_factor: 0.99,
            learning_rate: 0.2,
            learning_rate_decay: 0.995,
            threshold: 0.001,
            max_episodes: 1000,
        }
    }
}

/// Output of a Q-learning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QLearningResult {
    /// Action-value estimates: every state has a row, with one entry per
    /// legal action (terminal states have an empty row).
    pub q_values: BTreeMap<StateId, BTreeMap<Action, f64>>,
    /// Number of episodes run.
    pub episodes: u32,
    /// True when the last episode's maximum Q-value change was at or below
    /// the threshold; false when the episode cap stopped the run.
    pub converged: bool,
    /// Learning rate after the final decay step.
    pub final_learning_rate: f64,
}

impl QLearningResult {
    /// Q-value estimate for `(state, action)`; 0 when absent.
    pub fn q_value(&self, state: StateId, action: Action) -> f64 {
        self.q_values
            .get(&state)
            .and_then(|row| row.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Greedy action for `state`: the argmax over its legal actions, first
    /// in ascending label order on ties. `None` for terminal states.
    ///
    /// Computed on demand; the result stores only the Q-table.
    pub fn greedy_action(&self, state: StateId) -> Option<Action> {
        let row = self.q_values.get(&state)?;
        let mut best: Option<(Action, f64)> = None;
        for (&action, &q) in row {
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((action, q)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Greedy state value: `max_a Q(s, a)`; 0 for terminal states.
    pub fn state_value(&self, state: StateId) -> f64 {
        self.q_values
            .get(&state)
            .filter(|row| !row.is_empty())
            .map(|row| row.values().copied().fold(f64::NEG_INFINITY, f64::max))
            .unwrap_or(0.0)
    }
}

/// Q-learning solver.
///
/// Runs episodes from uniformly random start states under the uniform
/// random behavior policy, updating the Q-table with one-step TD targets
/// along the way. Stops once an episode's maximum Q-value change drops to
/// the threshold, or at the episode cap — whichever comes first. An episode
/// that starts on a terminal state contributes zero change and therefore
/// satisfies the threshold immediately.
#[derive(Debug)]
pub struct QLearning {
    config: QLearningConfig,
    rng: StdRng,
}

impl QLearning {
    /// Creates a solver with the given configuration and RNG seed.
    pub fn new(config: QLearningConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Estimates action-values for the graph.
    pub fn solve(&mut self, graph: &StateGraph) -> Result<QLearningResult, GraphError> {
        let mut q_values: BTreeMap<StateId, BTreeMap<Action, f64>> = graph
            .state_ids()
            .iter()
            .map(|&id| {
                let row = graph
                    .possible_actions(id)
                    .into_iter()
                    .map(|a| (a, 0.0))
                    .collect();
                (id, row)
            })
            .collect();

        let mut sampler = EpisodeSampler::new(graph, UniformRandomPolicy::new());
        let mut alpha = self.config.learning_rate;
        let mut episodes = 0u32;
        let mut max_change = f64::INFINITY;

        while max_change > self.config.threshold && episodes < self.config.max_episodes {
            episodes += 1;
            max_change = 0.0;

            let ids = graph.state_ids();
            let mut current = ids[self.rng.gen_range(0..ids.len())];

            while !graph.is_terminal(current) {
                let step = sampler.step(current, &mut self.rng)?;

                // Bootstrapped value of the successor; 0 when it has no
                // legal actions.
                let max_next_q = q_values
                    .get(&step.next)
                    .filter(|row| !row.is_empty())
                    .map(|row| row.values().copied().fold(f64::NEG_INFINITY, f64::max))
                    .unwrap_or(0.0);

                let row = q_values.entry(current).or_default();
                let old = row.get(&step.action).copied().unwrap_or(0.0);
                let target = step.reward + self.config.discount_factor * max_next_q;
                let new = old + alpha * (target - old);
                row.insert(step.action, new);

                max_change = max_change.max((new - old).abs());
                current = step.next;
            }

            alpha *= self.config.learning_rate_decay;
            debug!("episode {episodes}: max |ΔQ| {max_change:.6}, α {alpha:.6}");
        }

        Ok(QLearningResult {
            q_values,
            episodes,
            converged: max_change <= self.config.threshold,
            final_learning_rate: alpha,
        })
    }
}
