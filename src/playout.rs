//! Random playouts.
//!
//! A playout plays uniformly random legal moves until the side to move has
//! none left. Used as the demo opponent and to drive whole-game property
//! tests.

use fastrand::Rng;

use crate::board::Board;
use crate::error::Result;
use crate::movegen::legal_moves;
use crate::rules::SowingRules;

/// Pick a uniformly random legal move, or `None` if the mover has none.
pub fn random_move(board: &Board, rng: &mut Rng) -> Option<usize> {
    let moves = legal_moves(board);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play random moves from `board` until no legal move remains or `max_plies`
/// moves have been made.
///
/// Returns the final board and the number of plies played.
pub fn random_playout<R: SowingRules + ?Sized>(
    board: &Board,
    rules: &R,
    rng: &mut Rng,
    max_plies: usize,
) -> Result<(Board, usize)> {
    let mut board = board.clone();
    let mut plies = 0;

    while plies < max_plies {
        let Some(mv) = random_move(&board, rng) else {
            break;
        };
        board = rules.apply_sow(&board, mv)?;
        plies += 1;
    }

    Ok((board, plies))
}
