//! The three solvers plus the episode sampler they share.
//!
//! Each solver reads the immutable [`StateGraph`](crate::graph::StateGraph)
//! and returns a fresh result structure keyed by state id; nothing is
//! stored on the graph between runs. The two sampling solvers own a seeded
//! [`StdRng`](rand::rngs::StdRng), so a fixed seed reproduces a run
//! exactly.

pub mod episode;
pub mod monte_carlo;
pub mod q_learning;
pub mod value_iteration;

pub use episode::{Episode, EpisodeSampler, SampledStep};
pub use monte_carlo::{MonteCarlo, MonteCarloConfig, MonteCarloResult};
pub use q_learning::{QLearning, QLearningConfig, QLearningResult};
pub use value_iteration::{ValueIteration, ValueIterationConfig, ValueIterationResult};
