// Demonstration: evaluate the uniform random policy on the reference graph
// with first-visit Monte Carlo and print the state values.
//
// Run from this repo root (RUST_LOG=debug shows per-episode returns):
//   cargo run --example monte_carlo_demo -- --seed 42 --episodes 50

mod common;

use finite_mdp::{MonteCarlo, MonteCarloConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = common::arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let episodes: u32 = common::arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(50);

    let graph = common::board_game();
    let mut solver = MonteCarlo::new(
        MonteCarloConfig {
            episodes,
            ..MonteCarloConfig::default()
        },
        seed,
    );
    let result = solver
        .evaluate(&graph, 0)
        .expect("state 0 exists in the reference graph");

    println!("Monte Carlo evaluation from state 0 (seed {seed}, {episodes} episodes)");
    println!("--------------------------------------------------");
    for node in graph.states() {
        println!(
            "State {:>2} ({}): value = {:>8.4}",
            node.id,
            node.label,
            result.value(node.id)
        );
    }
    println!("--------------------------------------------------");
    println!("Average reward per episode: {:.4}", result.average_reward);
}
