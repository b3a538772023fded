//! Shared episode simulation for the sampling solvers.
//!
//! Q-learning drives [`EpisodeSampler::step`] directly so it can update its
//! Q-table between steps; Monte Carlo consumes whole [`Episode`]s.

use log::trace;
use rand::rngs::StdRng;

use crate::graph::{GraphError, StateGraph};
use crate::policy::ActionPolicy;
use crate::types::{Action, StateId};

/// One sampled transition of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledStep {
    /// Acting state.
    pub state: StateId,
    /// Action selected by the behavior policy.
    pub action: Action,
    /// Sampled successor state.
    pub next: StateId,
    /// Reward observed on the transition.
    pub reward: f64,
}

/// A complete trajectory from a start state to a terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Steps in the order they were taken.
    pub steps: Vec<SampledStep>,
    /// Total undiscounted reward accumulated over the episode.
    pub total_reward: f64,
}

impl Episode {
    /// Number of steps taken.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true for an episode that started on a terminal state.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Acting states in visit order (repeats included).
    pub fn visited_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.steps.iter().map(|s| s.state)
    }
}

/// Simulates trajectories through a [`StateGraph`] under an injected
/// action-selection policy.
pub struct EpisodeSampler<'g, P> {
    graph: &'g StateGraph,
    policy: P,
}

impl<'g, P: ActionPolicy> EpisodeSampler<'g, P> {
    pub fn new(graph: &'g StateGraph, policy: P) -> Self {
        Self { graph, policy }
    }

    /// Samples a single step from `state`: policy selects among the legal
    /// actions, the graph samples the successor and yields the reward.
    ///
    /// # Errors
    ///
    /// [`GraphError::TerminalState`] if `state` has no legal actions.
    pub fn step(&mut self, state: StateId, rng: &mut StdRng) -> Result<SampledStep, GraphError> {
        let actions = self.graph.possible_actions(state);
        if actions.is_empty() {
            return Err(GraphError::TerminalState(state));
        }
        let action = self.policy.select(state, &actions, rng);
        let next = self.graph.next_state(state, action, rng)?;
        let reward = self.graph.reward(state, action, next);
        trace!("step: {state} --{action}--> {next} (reward {reward})");
        Ok(SampledStep {
            state,
            action,
            next,
            reward,
        })
    }

    /// Runs a full episode from `start` until a terminal state is reached.
    ///
    /// An episode starting on a terminal state is empty with total reward 0.
    pub fn episode(&mut self, start: StateId, rng: &mut StdRng) -> Result<Episode, GraphError> {
        let mut steps = Vec::new();
        let mut total_reward = 0.0;
        let mut current = start;
        while !self.graph.is_terminal(current) {
            let step = self.step(current, rng)?;
            total_reward += step.reward;
            current = step.next;
            steps.push(step);
        }
        Ok(Episode {
            steps,
            total_reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::fixtures;
    use crate::policy::UniformRandomPolicy;

    /// Always selects the first legal action; lets tests pin trajectories.
    struct FirstActionPolicy;

    impl ActionPolicy for FirstActionPolicy {
        fn select(&mut self, _state: StateId, actions: &[Action], _rng: &mut StdRng) -> Action {
            actions[0]
        }

        fn name(&self) -> &str {
            "first-action"
        }
    }

    #[test]
    fn episodes_end_on_the_terminal_state() {
        let graph = fixtures::board_game();
        let mut sampler = EpisodeSampler::new(&graph, UniformRandomPolicy::new());
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let episode = sampler.episode(0, &mut rng).unwrap();
            assert!(!episode.is_empty());
            assert_eq!(episode.steps.last().unwrap().next, 10);
        }
    }

    #[test]
    fn terminal_states_never_act() {
        let graph = fixtures::board_game();
        let mut sampler = EpisodeSampler::new(&graph, UniformRandomPolicy::new());
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let episode = sampler.episode(0, &mut rng).unwrap();
            for state in episode.visited_states() {
                assert!(!graph.is_terminal(state));
            }
        }
    }

    #[test]
    fn total_reward_sums_the_steps() {
        let graph = fixtures::board_game();
        let mut sampler = EpisodeSampler::new(&graph, UniformRandomPolicy::new());
        let mut rng = StdRng::seed_from_u64(2);
        let episode = sampler.episode(0, &mut rng).unwrap();
        let sum: f64 = episode.steps.iter().map(|s| s.reward).sum();
        assert_eq!(episode.total_reward, sum);
    }

    #[test]
    fn episode_from_terminal_start_is_empty() {
        let graph = fixtures::board_game();
        let mut sampler = EpisodeSampler::new(&graph, UniformRandomPolicy::new());
        let mut rng = StdRng::seed_from_u64(2);
        let episode = sampler.episode(10, &mut rng).unwrap();
        assert!(episode.is_empty());
        assert_eq!(episode.total_reward, 0.0);
    }

    #[test]
    fn step_on_terminal_state_fails() {
        let graph = fixtures::board_game();
        let mut sampler = EpisodeSampler::new(&graph, UniformRandomPolicy::new());
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(
            sampler.step(10, &mut rng).unwrap_err(),
            GraphError::TerminalState(10)
        );
    }

    #[test]
    fn scripted_policy_pins_the_trajectory() {
        let graph = fixtures::board_game();
        let mut sampler = EpisodeSampler::new(&graph, FirstActionPolicy);
        let mut rng = StdRng::seed_from_u64(0);
        // First legal action is always 'P'; from 0 the P-chain is
        // deterministic: 0 -> 1 -> 7 -> 10.
        let episode = sampler.episode(0, &mut rng).unwrap();
        let visited: Vec<StateId> = episode.visited_states().collect();
        assert_eq!(visited, vec![0, 1, 7]);
        assert_eq!(episode.total_reward, 2.0 + 2.0 + 0.0);
    }

    #[test]
    fn same_seed_reproduces_the_episode() {
        let graph = fixtures::board_game();
        let run = |seed| {
            let mut sampler = EpisodeSampler::new(&graph, UniformRandomPolicy::new());
            let mut rng = StdRng::seed_from_u64(seed);
            sampler.episode(0, &mut rng).unwrap()
        };
        assert_eq!(run(13), run(13));
    }
}
