use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rand::Rng;

use super::error::GraphError;
use super::node::StateNode;
use crate::types::{Action, StateId};

/// Edge payload: one `(action, probability, reward)` entry of the
/// transition model.
#[derive(Debug, Clone)]
pub(super) struct TransitionEdge {
    pub action: Action,
    pub probability: f64,
    pub reward: f64,
}

/// Immutable finite MDP: states plus the transition and reward tables.
///
/// Built once through [`GraphBuilder`](super::GraphBuilder), which validates
/// the model invariants (per-action probabilities summing to 1, all
/// referenced ids defined). After construction the graph is read-only; all
/// learning state lives in the solvers and their result structures.
///
/// # Invariants
///
/// - For every `(state, action)` pair with at least one transition, the
///   probabilities over successors sum to 1 (tolerance 1e-9)
/// - Every transition endpoint is a registered state
/// - States reference each other only by id, resolved through the graph's
///   lookup map; cycles among non-terminal states are allowed
#[derive(Debug, Clone)]
pub struct StateGraph {
    pub(super) graph: DiGraph<StateNode, TransitionEdge>,
    /// Maps state id → node index for lookup.
    pub(super) node_by_id: HashMap<StateId, NodeIndex>,
    /// All state ids in ascending order, for deterministic enumeration.
    pub(super) ids: Vec<StateId>,
}

impl StateGraph {
    /// Returns all state ids in ascending order.
    pub fn state_ids(&self) -> &[StateId] {
        &self.ids
    }

    /// Returns the state with the given id, if it exists.
    pub fn node(&self, id: StateId) -> Option<&StateNode> {
        self.node_by_id
            .get(&id)
            .and_then(|&n| self.graph.node_weight(n))
    }

    /// Iterates over all states in ascending id order.
    pub fn states(&self) -> impl Iterator<Item = &StateNode> + '_ {
        self.ids.iter().filter_map(move |&id| self.node(id))
    }

    /// Number of states in the graph.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the graph has no states.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Distinct actions with at least one transition leaving `state`, in
    /// ascending label order. Empty for terminal (or unknown) states.
    pub fn possible_actions(&self, state: StateId) -> Vec<Action> {
        let Some(&node) = self.node_by_id.get(&state) else {
            return Vec::new();
        };
        let actions: BTreeSet<Action> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| e.weight().action)
            .collect();
        actions.into_iter().collect()
    }

    /// Successor distribution for `(state, action)` as `(next, probability)`
    /// pairs in ascending next-state id order.
    ///
    /// The fixed ordering makes cumulative-probability sampling reproducible
    /// and gives the fallback in [`next_state`](Self::next_state) a
    /// well-defined meaning.
    pub fn transitions_for(&self, state: StateId, action: Action) -> Vec<(StateId, f64)> {
        let Some(&node) = self.node_by_id.get(&state) else {
            return Vec::new();
        };
        let mut successors: Vec<(StateId, f64)> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .filter(|e| e.weight().action == action)
            .map(|e| (self.graph[e.target()].id, e.weight().probability))
            .collect();
        successors.sort_by_key(|&(id, _)| id);
        successors
    }

    /// Samples a successor of `state` under `action` according to the
    /// transition probabilities.
    ///
    /// Draws a uniform number in [0, 1) and walks the cumulative
    /// distribution over successors in ascending id order; if floating-point
    /// rounding leaves the draw uncovered, the last candidate is returned.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidAction`] if `action` has no transition out of
    /// `state` (or `state` is unknown).
    pub fn next_state<R: Rng>(
        &self,
        state: StateId,
        action: Action,
        rng: &mut R,
    ) -> Result<StateId, GraphError> {
        let successors = self.transitions_for(state, action);
        let Some(&(last, _)) = successors.last() else {
            return Err(GraphError::InvalidAction(state, action));
        };

        let draw: f64 = rng.gen();
        let mut cumulative = 0.0;
        for (next, probability) in successors {
            cumulative += probability;
            if draw < cumulative {
                return Ok(next);
            }
        }
        Ok(last)
    }

    /// Reward for taking `action` in `state` and landing in `next`.
    ///
    /// A triple absent from the reward table has reward 0.
    pub fn reward(&self, state: StateId, action: Action, next: StateId) -> f64 {
        let Some(&node) = self.node_by_id.get(&state) else {
            return 0.0;
        };
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .find(|e| e.weight().action == action && self.graph[e.target()].id == next)
            .map(|e| e.weight().reward)
            .unwrap_or(0.0)
    }

    /// Returns true if `state` is explicitly flagged terminal or has no
    /// outgoing transitions.
    pub fn is_terminal(&self, state: StateId) -> bool {
        match self.node_by_id.get(&state) {
            Some(&node) => {
                self.graph[node].terminal
                    || self
                        .graph
                        .edges_directed(node, Direction::Outgoing)
                        .next()
                        .is_none()
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::super::GraphBuilder;
    use super::*;
    use crate::fixtures;

    fn coin_flip_graph() -> StateGraph {
        GraphBuilder::new()
            .state(0, "start")
            .terminal_state(1, "heads")
            .terminal_state(2, "tails")
            .transition(0, Action('F'), 1, 0.5)
            .transition(0, Action('F'), 2, 0.5)
            .reward(0, Action('F'), 1, 1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn state_ids_are_ascending() {
        let graph = fixtures::board_game();
        assert_eq!(graph.state_ids(), (0..=10).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn possible_actions_sorted_and_distinct() {
        let graph = fixtures::board_game();
        assert_eq!(
            graph.possible_actions(0),
            vec![Action('P'), Action('R'), Action('S')]
        );
        // State 1 has only two legal actions.
        assert_eq!(graph.possible_actions(1), vec![Action('P'), Action('R')]);
    }

    #[test]
    fn terminal_state_has_no_actions() {
        let graph = fixtures::board_game();
        assert!(graph.possible_actions(10).is_empty());
        assert!(graph.is_terminal(10));
    }

    #[test]
    fn non_terminal_states_are_not_terminal() {
        let graph = fixtures::board_game();
        for id in 0..10 {
            assert!(!graph.is_terminal(id), "state {id} wrongly terminal");
        }
    }

    #[test]
    fn transitions_for_orders_by_next_id() {
        let graph = fixtures::board_game();
        // (2, P) splits 0.5/0.5 between states 4 and 7.
        assert_eq!(
            graph.transitions_for(2, Action('P')),
            vec![(4, 0.5), (7, 0.5)]
        );
    }

    #[test]
    fn reward_defaults_to_zero_for_missing_triple() {
        let graph = coin_flip_graph();
        assert_eq!(graph.reward(0, Action('F'), 1), 1.0);
        assert_eq!(graph.reward(0, Action('F'), 2), 0.0);
    }

    #[test]
    fn next_state_rejects_illegal_action() {
        let graph = fixtures::board_game();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            graph.next_state(1, Action('S'), &mut rng),
            Err(GraphError::InvalidAction(1, Action('S')))
        );
    }

    #[test]
    fn next_state_is_deterministic_under_a_fixed_seed() {
        let graph = coin_flip_graph();
        let sample = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| graph.next_state(0, Action('F'), &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(sample(7), sample(7));
    }

    #[test]
    fn next_state_follows_the_distribution() {
        let graph = coin_flip_graph();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10_000;
        let heads = (0..n)
            .filter(|_| graph.next_state(0, Action('F'), &mut rng).unwrap() == 1)
            .count();
        let ratio = heads as f64 / n as f64;
        assert!((ratio - 0.5).abs() < 0.03, "ratio {ratio} too far from 0.5");
    }

    #[test]
    fn deterministic_transition_always_lands_on_its_successor() {
        let graph = fixtures::board_game();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(graph.next_state(0, Action('R'), &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn unknown_state_is_treated_as_terminal() {
        let graph = coin_flip_graph();
        assert!(graph.is_terminal(99));
        assert!(graph.possible_actions(99).is_empty());
        assert!(graph.node(99).is_none());
    }
}
