//! Model-based dynamic programming: Bellman optimality backups to a fixed
//! point.

use std::collections::BTreeMap;

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::StateGraph;
use crate::types::{Action, StateId};

/// Configuration for [`ValueIteration`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueIterationConfig {
    /// Discount factor γ applied to successor values.
    pub discount_factor: f64,
    /// Stop once a sweep's maximum absolute value change is at or below this.
    pub threshold: f64,
    /// Hard sweep cap guaranteeing termination on graphs where the backup
    /// does not contract (e.g. γ = 1 around a rewarded cycle).
    pub max_sweeps: u32,
}

impl Default for ValueIterationConfig {
    fn default() -> Self {
        Self {
            discount_factor: 0.99,
            threshold: 0.001,
            max_sweeps: 10_000,
        }
    }
}

/// Output of a value-iteration run.
///
/// Returned fresh from every [`ValueIteration::solve`] call; nothing is
/// stored on the graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueIterationResult {
    /// Final value estimate per state.
    pub values: BTreeMap<StateId, f64>,
    /// Greedy action per state; states without legal actions are absent.
    pub policy: BTreeMap<StateId, Action>,
    /// Number of sweeps performed.
    pub sweeps: u32,
    /// Maximum absolute value change of each sweep, in order.
    pub sweep_changes: Vec<f64>,
    /// False when the sweep cap was reached before the threshold; the
    /// values and policy are then best-effort estimates.
    pub converged: bool,
}

impl ValueIterationResult {
    /// Value estimate for `state`; 0 for unknown states.
    pub fn value(&self, state: StateId) -> f64 {
        self.values.get(&state).copied().unwrap_or(0.0)
    }

    /// Greedy action for `state`, if one was computed.
    pub fn action(&self, state: StateId) -> Option<Action> {
        self.policy.get(&state).copied()
    }
}

/// Value-iteration solver.
///
/// Sweeps all states in ascending id order, replacing each state's value
/// with the best one-step Bellman backup. Updates are asynchronous
/// (Gauss–Seidel): a backup sees values already updated earlier in the same
/// sweep. Iterates until the maximum per-sweep change drops to the
/// configured threshold or the sweep cap is hit.
#[derive(Debug, Clone, Default)]
pub struct ValueIteration {
    config: ValueIterationConfig,
}

impl ValueIteration {
    pub fn new(config: ValueIterationConfig) -> Self {
        Self { config }
    }

    /// Solves the graph starting from all-zero values.
    pub fn solve(&self, graph: &StateGraph) -> ValueIterationResult {
        self.solve_from(graph, &BTreeMap::new())
    }

    /// Solves the graph starting from a previously computed value function.
    ///
    /// States missing from `initial` start at 0. Warm-starting from a
    /// converged result performs a single sweep with zero change.
    pub fn solve_from(
        &self,
        graph: &StateGraph,
        initial: &BTreeMap<StateId, f64>,
    ) -> ValueIterationResult {
        let mut values: BTreeMap<StateId, f64> = graph
            .state_ids()
            .iter()
            .map(|&id| (id, initial.get(&id).copied().unwrap_or(0.0)))
            .collect();
        let mut policy: BTreeMap<StateId, Action> = BTreeMap::new();
        let mut sweep_changes = Vec::new();
        let mut converged = false;

        while sweep_changes.len() < self.config.max_sweeps as usize {
            let max_change = self.sweep(graph, &mut values, &mut policy);
            sweep_changes.push(max_change);
            debug!(
                "value iteration sweep {}: max change {max_change:.6}",
                sweep_changes.len()
            );
            if max_change <= self.config.threshold {
                converged = true;
                break;
            }
        }

        ValueIterationResult {
            values,
            policy,
            sweeps: sweep_changes.len() as u32,
            sweep_changes,
            converged,
        }
    }

    /// One sweep over all states; returns the maximum absolute value change.
    fn sweep(
        &self,
        graph: &StateGraph,
        values: &mut BTreeMap<StateId, f64>,
        policy: &mut BTreeMap<StateId, Action>,
    ) -> f64 {
        let mut max_change = 0.0f64;
        for &state in graph.state_ids() {
            let actions = graph.possible_actions(state);
            // Terminal states keep their value and get no policy.
            if actions.is_empty() {
                continue;
            }

            let old = values.get(&state).copied().unwrap_or(0.0);
            let mut best_value = f64::NEG_INFINITY;
            let mut best_action = actions[0];
            for action in actions {
                let backup = self.backup(graph, values, state, action);
                if backup > best_value {
                    best_value = backup;
                    best_action = action;
                }
            }

            values.insert(state, best_value);
            policy.insert(state, best_action);
            max_change = max_change.max((best_value - old).abs());
        }
        max_change
    }

    /// Expected one-step return of `action` in `state`:
    /// `Σ_{s'} P(s,a,s') · [R(s,a,s') + γ·V(s')]`.
    fn backup(
        &self,
        graph: &StateGraph,
        values: &BTreeMap<StateId, f64>,
        state: StateId,
        action: Action,
    ) -> f64 {
        graph
            .transitions_for(state, action)
            .into_iter()
            .map(|(next, probability)| {
                let reward = graph.reward(state, action, next);
                let next_value = values.get(&next).copied().unwrap_or(0.0);
                probability * (reward + self.config.discount_factor * next_value)
            })
            .sum()
    }
}
