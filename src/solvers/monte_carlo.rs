//! First-visit Monte Carlo policy evaluation under the uniform random
//! behavior policy.
//!
//! Two deliberate departures from the textbook method, kept for
//! compatibility with the system this models: every first-visit update uses
//! the episode's *total* return rather than the return from the visited
//! state onward, and returns are not discounted.

use std::collections::{BTreeMap, HashSet};

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::episode::EpisodeSampler;
use crate::graph::{GraphError, StateGraph};
use crate::policy::UniformRandomPolicy;
use crate::types::StateId;

/// Configuration for [`MonteCarlo`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonteCarloConfig {
    /// Constant learning rate α for value updates; never decayed.
    pub learning_rate: f64,
    /// Fixed episode budget; there is no convergence-threshold stop.
    pub episodes: u32,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            episodes: 50,
        }
    }
}

/// Output of a Monte Carlo evaluation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonteCarloResult {
    /// Final value estimate per state; never-visited states stay at 0.
    pub values: BTreeMap<StateId, f64>,
    /// Mean total reward over all episodes.
    pub average_reward: f64,
    /// Number of episodes run.
    pub episodes: u32,
}

impl MonteCarloResult {
    /// Value estimate for `state`; 0 for unknown states.
    pub fn value(&self, state: StateId) -> f64 {
        self.values.get(&state).copied().unwrap_or(0.0)
    }
}

/// First-visit Monte Carlo evaluator.
///
/// Runs a fixed budget of episodes from a caller-supplied start state under
/// the uniform random policy. Within one episode each distinct state
/// updates exactly once, toward the episode's total return:
/// `V(s) += α·(G − V(s))`.
#[derive(Debug)]
pub struct MonteCarlo {
    config: MonteCarloConfig,
    rng: StdRng,
}

impl MonteCarlo {
    /// Creates an evaluator with the given configuration and RNG seed.
    pub fn new(config: MonteCarloConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Evaluates the random policy from `start`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownState`] if `start` is not in the graph.
    pub fn evaluate(
        &mut self,
        graph: &StateGraph,
        start: StateId,
    ) -> Result<MonteCarloResult, GraphError> {
        if graph.node(start).is_none() {
            return Err(GraphError::UnknownState(start));
        }

        let mut values: BTreeMap<StateId, f64> =
            graph.state_ids().iter().map(|&id| (id, 0.0)).collect();
        let mut sampler = EpisodeSampler::new(graph, UniformRandomPolicy::new());
        let mut reward_sum = 0.0;

        for episode_index in 1..=self.config.episodes {
            let episode = sampler.episode(start, &mut self.rng)?;
            reward_sum += episode.total_reward;
            debug!(
                "episode {episode_index}: {} steps, total reward {}",
                episode.len(),
                episode.total_reward
            );

            let mut visited: HashSet<StateId> = HashSet::new();
            for state in episode.visited_states() {
                if visited.insert(state) {
                    let value = values.entry(state).or_insert(0.0);
                    *value += self.config.learning_rate * (episode.total_reward - *value);
                }
            }
        }

        let average_reward = if self.config.episodes == 0 {
            0.0
        } else {
            reward_sum / f64::from(self.config.episodes)
        };

        Ok(MonteCarloResult {
            values,
            average_reward,
            episodes: self.config.episodes,
        })
    }
}
