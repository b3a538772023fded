//! Core identifier types for the MDP state graph.
//!
//! States are referenced by opaque caller-supplied ids; actions are opaque
//! single-character labels from a small alphabet. Neither carries any
//! semantic weight for the solvers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier for a state in the graph.
///
/// Supplied by the graph constructor; the solvers key all of their outputs
/// by this id.
pub type StateId = usize;

/// An opaque action label.
///
/// The set of legal actions at a state is exactly the set of labels
/// appearing on transitions leaving that state. `Ord` so that action
/// enumeration (and therefore greedy tie-breaking) is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Action(pub char);

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
