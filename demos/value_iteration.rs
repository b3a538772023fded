// Demonstration: solve the reference 11-state graph with value iteration
// and print the optimal values and policy.
//
// Run from this repo root (RUST_LOG=debug shows per-sweep progress):
//   cargo run --example value_iteration_demo

mod common;

use finite_mdp::{ValueIteration, ValueIterationConfig};

fn main() {
    env_logger::init();

    let graph = common::board_game();
    let solver = ValueIteration::new(ValueIterationConfig::default());
    let result = solver.solve(&graph);

    println!("Value iteration on the reference graph");
    println!("--------------------------------------------------");
    for node in graph.states() {
        let policy = result
            .action(node.id)
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "State {:>2} ({}): value = {:>8.4}, optimal action = {}",
            node.id,
            node.label,
            result.value(node.id),
            policy
        );
    }
    println!("--------------------------------------------------");
    println!(
        "Sweeps: {} ({})",
        result.sweeps,
        if result.converged {
            "converged"
        } else {
            "sweep cap reached"
        }
    );
}
