//! Legal move generation.

use crate::board::Board;
use crate::error::{IllegalReason, MancalaError, Result};

/// Every non-empty pit on the mover's side, in ascending index order.
///
/// An empty list means the position is terminal for the player to move.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    board
        .side(board.player())
        .filter(|&idx| board.pits()[idx] > 0)
        .collect()
}

/// Check that `pit` may be sown by the player to move.
pub fn check_legal(board: &Board, pit: usize) -> Result<()> {
    let reason = match (board.owner(pit), board.pit(pit)) {
        (None, _) | (_, None) => IllegalReason::OutOfRange,
        (Some(owner), _) if owner != board.player() => IllegalReason::NotOwned,
        (_, Some(0)) => IllegalReason::Empty,
        _ => return Ok(()),
    };
    Err(MancalaError::IllegalMove { pit, reason })
}

pub fn is_legal(board: &Board, pit: usize) -> bool {
    check_legal(board, pit).is_ok()
}
