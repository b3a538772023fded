use thiserror::Error;

use crate::types::{Action, StateId};

/// Errors raised while constructing or querying a [`StateGraph`](super::StateGraph).
///
/// Construction-time variants abort [`GraphBuilder::build`](super::GraphBuilder::build);
/// `InvalidAction` and `TerminalState` indicate a caller bug at query time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("State id {0} is registered more than once")]
    DuplicateState(StateId),

    #[error("State id {0} is not defined in the graph")]
    UnknownState(StateId),

    #[error("Transition ({0}, {1}, {2}) references undefined next state {2}")]
    UnknownNextState(StateId, Action, StateId),

    #[error("Transition ({0}, {1}, {2}) has probability {3}, expected a value in (0, 1]")]
    InvalidProbability(StateId, Action, StateId, f64),

    #[error("Transition probabilities for state {0}, action {1} sum to {2}, expected 1")]
    ProbabilitySum(StateId, Action, f64),

    #[error("Reward ({0}, {1}, {2}) has no matching transition")]
    RewardWithoutTransition(StateId, Action, StateId),

    #[error("Action {1} is not available in state {0}")]
    InvalidAction(StateId, Action),

    #[error("State {0} has no available actions")]
    TerminalState(StateId),
}
