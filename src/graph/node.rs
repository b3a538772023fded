//! State nodes of the MDP graph.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::StateId;

/// A single state of the decision process.
///
/// The label is for display only; the solvers operate purely on ids and the
/// transition structure. A state is terminal when explicitly flagged, or
/// implicitly when no transition leaves it — [`StateGraph::is_terminal`](super::StateGraph::is_terminal)
/// covers both.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateNode {
    /// Caller-supplied identifier.
    pub id: StateId,
    /// Human-readable label, e.g. `"RU 8p"`.
    pub label: String,
    /// Explicit terminal flag.
    pub terminal: bool,
}

impl StateNode {
    /// Creates a non-terminal state.
    pub fn new(id: StateId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            terminal: false,
        }
    }

    /// Creates an explicitly terminal state.
    pub fn terminal(id: StateId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            terminal: true,
        }
    }
}

impl fmt::Display for StateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.label)
    }
}
