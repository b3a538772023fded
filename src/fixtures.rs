//! Shared test fixture: the 11-state reference graph.
//!
//! A board-game-like progression with three actions (`P`, `R`, `S`) per
//! non-terminal state and a single terminal state 10. States 2 and 3 have
//! one stochastic action each; everything else is deterministic.

use crate::graph::{GraphBuilder, StateGraph};
use crate::types::Action;

const P: Action = Action('P');
const R: Action = Action('R');
const S: Action = Action('S');

pub fn board_game() -> StateGraph {
    GraphBuilder::new()
        .state(0, "RU 8p")
        .state(1, "TU 10p")
        .state(2, "RU 10p")
        .state(3, "RD 10p")
        .state(4, "RU 8a")
        .state(5, "RD 8a")
        .state(6, "TU 10a")
        .state(7, "RU 10a")
        .state(8, "RD 10a")
        .state(9, "TD 10a")
        .terminal_state(10, "__ 11a")
        .transition(0, P, 1, 1.0)
        .transition(0, R, 2, 1.0)
        .transition(0, S, 3, 1.0)
        .transition(1, R, 4, 1.0)
        .transition(1, P, 7, 1.0)
        .transition(2, R, 4, 1.0)
        .transition(2, P, 4, 0.5)
        .transition(2, P, 7, 0.5)
        .transition(2, S, 5, 1.0)
        .transition(3, R, 5, 1.0)
        .transition(3, P, 5, 0.5)
        .transition(3, P, 8, 0.5)
        .transition(4, P, 6, 1.0)
        .transition(4, R, 7, 1.0)
        .transition(4, S, 8, 1.0)
        .transition(5, R, 8, 1.0)
        .transition(5, P, 9, 1.0)
        .transition(6, P, 10, 1.0)
        .transition(6, R, 10, 1.0)
        .transition(6, S, 10, 1.0)
        .transition(7, P, 10, 1.0)
        .transition(7, R, 10, 1.0)
        .transition(7, S, 10, 1.0)
        .transition(8, P, 10, 1.0)
        .transition(8, R, 10, 1.0)
        .transition(8, S, 10, 1.0)
        .transition(9, P, 10, 1.0)
        .transition(9, R, 10, 1.0)
        .transition(9, S, 10, 1.0)
        .reward(0, P, 1, 2.0)
        .reward(0, S, 3, -1.0)
        .reward(1, P, 7, 2.0)
        .reward(2, P, 4, 2.0)
        .reward(2, P, 7, 2.0)
        .reward(2, S, 5, -1.0)
        .reward(3, P, 5, 2.0)
        .reward(3, P, 8, 2.0)
        .reward(4, P, 6, 2.0)
        .reward(4, S, 8, -1.0)
        .reward(5, P, 9, 2.0)
        .reward(6, P, 10, -1.0)
        .reward(6, R, 10, -1.0)
        .reward(6, S, 10, -1.0)
        .reward(8, P, 10, 4.0)
        .reward(8, R, 10, 4.0)
        .reward(8, S, 10, 4.0)
        .reward(9, P, 10, 3.0)
        .reward(9, R, 10, 3.0)
        .reward(9, S, 10, 3.0)
        .build()
        .expect("reference graph satisfies the model invariants")
}
