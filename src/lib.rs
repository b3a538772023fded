//! finite-mdp - tabular solvers for finite Markov Decision Processes
//!
//! Models an MDP over a small fixed set of states and computes value
//! estimates and policies with three classical algorithms: value iteration
//! (model-based dynamic programming), Q-learning (model-free
//! temporal-difference control), and first-visit Monte Carlo policy
//! evaluation.
//!
//! The [`StateGraph`] is built once through the validating [`GraphBuilder`]
//! and shared immutably; each solver returns a fresh result structure keyed
//! by [`StateId`]. Sampling solvers take an explicit RNG seed, so runs are
//! reproducible.
//!
//! ```
//! use finite_mdp::{Action, GraphBuilder, ValueIteration, ValueIterationConfig};
//!
//! let graph = GraphBuilder::new()
//!     .state(0, "start")
//!     .terminal_state(1, "end")
//!     .transition(0, Action('a'), 1, 1.0)
//!     .reward(0, Action('a'), 1, 5.0)
//!     .build()
//!     .unwrap();
//!
//! let result = ValueIteration::new(ValueIterationConfig::default()).solve(&graph);
//! assert_eq!(result.value(0), 5.0);
//! assert_eq!(result.action(0), Some(Action('a')));
//! ```

pub mod graph;
pub mod policy;
pub mod solvers;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use graph::{GraphBuilder, GraphError, StateGraph, StateNode};
pub use policy::{ActionPolicy, UniformRandomPolicy};
pub use solvers::episode::{Episode, EpisodeSampler, SampledStep};
pub use solvers::monte_carlo::{MonteCarlo, MonteCarloConfig, MonteCarloResult};
pub use solvers::q_learning::{QLearning, QLearningConfig, QLearningResult};
pub use solvers::value_iteration::{ValueIteration, ValueIterationConfig, ValueIterationResult};
pub use types::{Action, StateId};
