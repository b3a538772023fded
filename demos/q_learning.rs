// Demonstration: estimate action-values for the reference graph with
// Q-learning and print the Q-table and greedy policy.
//
// Run from this repo root (RUST_LOG=debug shows per-episode progress):
//   cargo run --example q_learning_demo -- --seed 42

mod common;

use finite_mdp::{QLearning, QLearningConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = common::arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let graph = common::board_game();
    let mut solver = QLearning::new(QLearningConfig::default(), seed);
    let result = solver.solve(&graph).expect("reference graph is well-formed");

    println!("Q-learning on the reference graph (seed {seed})");
    println!("--------------------------------------------------");
    for node in graph.states() {
        let row = &result.q_values[&node.id];
        if row.is_empty() {
            println!("State {:>2} ({}): terminal", node.id, node.label);
            continue;
        }
        let q_str = row
            .iter()
            .map(|(a, q)| format!("{a}: {q:>8.4}"))
            .collect::<Vec<_>>()
            .join(", ");
        let greedy = result
            .greedy_action(node.id)
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "State {:>2} ({}): {{ {q_str} }}, greedy action = {greedy}",
            node.id, node.label
        );
    }
    println!("--------------------------------------------------");
    println!(
        "Episodes: {} ({}), final learning rate: {:.6}",
        result.episodes,
        if result.converged {
            "threshold reached"
        } else {
            "episode cap reached"
        },
        result.final_learning_rate
    );
}
