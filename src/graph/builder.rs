use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};

use super::error::GraphError;
use super::node::StateNode;
use super::state_graph::{StateGraph, TransitionEdge};
use crate::types::{Action, StateId};

/// Tolerance when checking that per-action probabilities sum to 1.
const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Validating constructor for [`StateGraph`].
///
/// Collects states, transitions, and rewards through chained calls, then
/// checks the model invariants in [`build`](Self::build). Registering the
/// same transition or reward triple twice keeps the last value.
///
/// # Example
///
/// ```
/// use finite_mdp::{Action, GraphBuilder};
///
/// let graph = GraphBuilder::new()
///     .state(0, "start")
///     .terminal_state(1, "end")
///     .transition(0, Action('a'), 1, 1.0)
///     .reward(0, Action('a'), 1, 5.0)
///     .build()
///     .unwrap();
/// assert_eq!(graph.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    states: Vec<StateNode>,
    transitions: BTreeMap<(StateId, Action, StateId), f64>,
    rewards: BTreeMap<(StateId, Action, StateId), f64>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a non-terminal state.
    pub fn state(mut self, id: StateId, label: impl Into<String>) -> Self {
        self.states.push(StateNode::new(id, label));
        self
    }

    /// Registers an explicitly terminal state.
    pub fn terminal_state(mut self, id: StateId, label: impl Into<String>) -> Self {
        self.states.push(StateNode::terminal(id, label));
        self
    }

    /// Registers a transition `(from, action, to)` with the given probability.
    pub fn transition(mut self, from: StateId, action: Action, to: StateId, probability: f64) -> Self {
        self.transitions.insert((from, action, to), probability);
        self
    }

    /// Registers a reward for the transition `(from, action, to)`.
    ///
    /// Transitions without a registered reward yield 0.
    pub fn reward(mut self, from: StateId, action: Action, to: StateId, reward: f64) -> Self {
        self.rewards.insert((from, action, to), reward);
        self
    }

    /// Validates the collected model and builds the graph.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateState`] if a state id is registered twice
    /// - [`GraphError::UnknownState`] / [`GraphError::UnknownNextState`] if a
    ///   transition endpoint is not a registered state
    /// - [`GraphError::InvalidProbability`] if a probability lies outside (0, 1]
    /// - [`GraphError::ProbabilitySum`] if the probabilities for a
    ///   `(state, action)` pair do not sum to 1 (tolerance 1e-9)
    /// - [`GraphError::RewardWithoutTransition`] if a reward triple has no
    ///   matching transition
    pub fn build(mut self) -> Result<StateGraph, GraphError> {
        self.states.sort_by_key(|s| s.id);

        let mut graph: DiGraph<StateNode, TransitionEdge> = DiGraph::new();
        let mut node_by_id: HashMap<StateId, NodeIndex> = HashMap::new();
        let mut ids = Vec::with_capacity(self.states.len());

        for state in self.states {
            let id = state.id;
            let node = graph.add_node(state);
            if node_by_id.insert(id, node).is_some() {
                return Err(GraphError::DuplicateState(id));
            }
            ids.push(id);
        }

        let mut sums: BTreeMap<(StateId, Action), f64> = BTreeMap::new();
        for (&(from, action, to), &probability) in &self.transitions {
            let &from_node = node_by_id
                .get(&from)
                .ok_or(GraphError::UnknownState(from))?;
            let &to_node = node_by_id
                .get(&to)
                .ok_or(GraphError::UnknownNextState(from, action, to))?;
            if !(probability > 0.0 && probability <= 1.0) {
                return Err(GraphError::InvalidProbability(from, action, to, probability));
            }
            *sums.entry((from, action)).or_insert(0.0) += probability;

            let reward = self.rewards.remove(&(from, action, to)).unwrap_or(0.0);
            graph.add_edge(
                from_node,
                to_node,
                TransitionEdge {
                    action,
                    probability,
                    reward,
                },
            );
        }

        for ((from, action), sum) in sums {
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(GraphError::ProbabilitySum(from, action, sum));
            }
        }

        // Any reward not consumed above has no matching transition.
        if let Some((&(from, action, to), _)) = self.rewards.iter().next() {
            return Err(GraphError::RewardWithoutTransition(from, action, to));
        }

        Ok(StateGraph {
            graph,
            node_by_id,
            ids,
        })
    }
}
