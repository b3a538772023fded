//! The MDP state graph: nodes, transition/reward tables, and the validating
//! builder.
//!
//! The graph is constructed once and never mutated; solvers read it through
//! a shared reference and return their estimates in fresh result
//! structures. Successor sampling walks the cumulative distribution in
//! ascending next-state id order so that results are reproducible under a
//! seeded RNG.

pub mod builder;
pub mod error;
pub mod node;
pub mod state_graph;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use node::StateNode;
pub use state_graph::StateGraph;
