//! Depth-bounded minimax search.
//!
//! Scores are always taken from the perspective of the player to move at the
//! root: nodes where that player moves maximize, the opponent's nodes
//! minimize. Extra turns simply produce two maximizing (or minimizing) plies
//! in a row.
//!
//! The tree is walked with an explicit stack of frames rather than native
//! recursion, so the caller-supplied depth only costs heap, never call stack.
//!
//! Children are visited in ascending pit order and a node's best move is only
//! replaced on a strictly better score, so ties go to the lowest pit index.

use log::trace;
use rayon::prelude::*;

use crate::board::{Board, Player};
use crate::error::Result;
use crate::movegen::legal_moves;
use crate::rules::SowingRules;

/// Outcome of a search at one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Best pit to sow; `None` when the node has no legal move
    pub best_move: Option<usize>,
    /// Minimax score, root player's store minus the opponent's
    pub score: i64,
}

/// Node counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards visited, the root included
    pub nodes: u64,
    /// Boards scored by the static evaluation
    pub leaves: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Search the root moves on the rayon thread pool
    pub parallel: bool,
}

/// Static evaluation: `perspective`'s store minus the opponent's.
pub fn evaluate(board: &Board, perspective: Player) -> i64 {
    board.store(perspective) as i64 - board.store(perspective.opponent()) as i64
}

/// An interior node waiting for its children's scores.
struct Frame {
    board: Board,
    depth: u32,
    moves: Vec<usize>,
    next: usize,
    maximizing: bool,
    best: Option<(usize, i64)>,
}

impl Frame {
    fn new(board: Board, depth: u32, moves: Vec<usize>, perspective: Player) -> Self {
        let maximizing = board.player() == perspective;
        Self {
            board,
            depth,
            moves,
            next: 0,
            maximizing,
            best: None,
        }
    }

    fn offer(&mut self, mv: usize, score: i64) {
        let better = match self.best {
            None => true,
            Some((_, best)) if self.maximizing => score > best,
            Some((_, best)) => score < best,
        };
        if better {
            self.best = Some((mv, score));
        }
    }

    fn result(&self, perspective: Player) -> SearchResult {
        match self.best {
            Some((mv, score)) => SearchResult {
                best_move: Some(mv),
                score,
            },
            None => SearchResult {
                best_move: None,
                score: evaluate(&self.board, perspective),
            },
        }
    }
}

/// Score a board without expanding it.
///
/// The move reported for a leaf is the first legal move: no sowing is done,
/// so every move shares the same static score and the lowest index wins.
fn leaf(board: &Board, moves: &[usize], perspective: Player, stats: &mut SearchStats) -> SearchResult {
    stats.leaves += 1;
    SearchResult {
        best_move: moves.first().copied(),
        score: evaluate(board, perspective),
    }
}

fn minimax<R: SowingRules + ?Sized>(
    root: &Board,
    depth: u32,
    perspective: Player,
    rules: &R,
    stats: &mut SearchStats,
) -> Result<SearchResult> {
    stats.nodes += 1;
    let moves = legal_moves(root);
    if depth == 0 || moves.is_empty() {
        return Ok(leaf(root, &moves, perspective, stats));
    }

    let mut outcome = SearchResult {
        best_move: None,
        score: evaluate(root, perspective),
    };
    let mut stack = vec![Frame::new(root.clone(), depth, moves, perspective)];
    // Score handed up by the child that just finished.
    let mut returned: Option<i64> = None;

    while let Some(frame) = stack.last_mut() {
        if let Some(score) = returned.take() {
            let mv = frame.moves[frame.next - 1];
            frame.offer(mv, score);
        }

        if frame.next < frame.moves.len() {
            let mv = frame.moves[frame.next];
            frame.next += 1;
            let child = rules.apply_sow(&frame.board, mv)?;
            let child_depth = frame.depth - 1;

            stats.nodes += 1;
            let child_moves = legal_moves(&child);
            if child_depth == 0 || child_moves.is_empty() {
                returned = Some(leaf(&child, &child_moves, perspective, stats).score);
            } else {
                stack.push(Frame::new(child, child_depth, child_moves, perspective));
            }
            continue;
        }

        let result = frame.result(perspective);
        trace!(
            "depth {} best {:?} score {}",
            frame.depth, result.best_move, result.score
        );
        stack.pop();
        if stack.is_empty() {
            outcome = result;
        } else {
            returned = Some(result.score);
        }
    }

    Ok(outcome)
}

/// Minimax search from `board` to `depth` plies.
pub fn search<R: SowingRules + ?Sized>(board: &Board, depth: u32, rules: &R) -> Result<SearchResult> {
    search_with_stats(board, depth, rules).map(|(result, _)| result)
}

/// Like [`search`], also returning node counters.
pub fn search_with_stats<R: SowingRules + ?Sized>(
    board: &Board,
    depth: u32,
    rules: &R,
) -> Result<(SearchResult, SearchStats)> {
    let mut stats = SearchStats::default();
    let result = minimax(board, depth, board.player(), rules, &mut stats)?;
    Ok((result, stats))
}

/// Minimax with the root moves split across the rayon pool.
///
/// Each subtree is searched sequentially, and the results are reduced in
/// ascending move order, so the outcome matches [`search`] exactly.
pub fn search_parallel<R: SowingRules + Sync + ?Sized>(
    board: &Board,
    depth: u32,
    rules: &R,
) -> Result<(SearchResult, SearchStats)> {
    let perspective = board.player();
    let mut stats = SearchStats {
        nodes: 1,
        leaves: 0,
    };
    let moves = legal_moves(board);
    if depth == 0 || moves.is_empty() {
        let result = leaf(board, &moves, perspective, &mut stats);
        return Ok((result, stats));
    }

    let children: Vec<Result<(usize, SearchResult, SearchStats)>> = moves
        .par_iter()
        .map(|&mv| {
            let child = rules.apply_sow(board, mv)?;
            let mut child_stats = SearchStats::default();
            let result = minimax(&child, depth - 1, perspective, rules, &mut child_stats)?;
            Ok((mv, result, child_stats))
        })
        .collect();

    let mut root = Frame::new(board.clone(), depth, moves, perspective);
    for child in children {
        let (mv, result, child_stats) = child?;
        stats.merge(child_stats);
        root.offer(mv, result.score);
    }
    Ok((root.result(perspective), stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::KalahRules;

    fn board(pits: &[u32], player: Player) -> Board {
        Board::new(pits.to_vec(), player).unwrap()
    }

    #[test]
    fn test_evaluate_perspective() {
        let b = Board::with_stores(vec![1, 1], [5, 2], Player::One).unwrap();
        assert_eq!(evaluate(&b, Player::One), 3);
        assert_eq!(evaluate(&b, Player::Two), -3);
    }

    #[test]
    fn test_depth_zero_returns_first_legal_move() {
        let b = board(&[0, 0, 3, 1, 1, 1], Player::One);
        let (result, stats) = search_with_stats(&b, 0, &KalahRules::default()).unwrap();
        assert_eq!(result.best_move, Some(2));
        assert_eq!(result.score, 0);
        assert_eq!(stats, SearchStats { nodes: 1, leaves: 1 });
    }

    #[test]
    fn test_no_legal_move_has_no_best_move() {
        let b = board(&[0], Player::One);
        let result = search(&b, 3, &KalahRules::default()).unwrap();
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_depth_one_prefers_extra_turn() {
        // Pit 2 lands its last seed in the store, pit 0 does not.
        let b = board(&[4, 0, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1], Player::One);
        let result = search(&b, 1, &KalahRules::default()).unwrap();
        assert_eq!(result.best_move, Some(2));
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_depth_one_prefers_capture() {
        // Pit 0 drops into empty pit 1 and captures the 5 seeds in pit 10.
        let b = board(&[1, 0, 0, 0, 0, 2, 3, 0, 0, 0, 5, 0], Player::One);
        let result = search(&b, 1, &KalahRules::default()).unwrap();
        assert_eq!(result.best_move, Some(0));
        assert_eq!(result.score, 6);
    }

    #[test]
    fn test_ties_go_to_lowest_pit() {
        let b = board(&[1, 1, 1, 1, 1, 1, 1, 1], Player::One);
        let moves = legal_moves(&b);
        let result = search(&b, 1, &KalahRules::default()).unwrap();
        // Every first move scores 0 at depth one except a store landing.
        assert!(moves.contains(&result.best_move.unwrap()));
        assert_eq!(result.best_move, Some(3));
        assert_eq!(result.score, 1);

        let flat = board(&[1, 0, 1, 0, 0, 5, 0, 5], Player::One);
        let result = search(&flat, 1, &KalahRules::default()).unwrap();
        assert_eq!(result.best_move, Some(0));
    }

    #[test]
    fn test_root_player_two_maximizes_own_store() {
        // Pit 4 drops into empty pit 5 and captures pit 2.
        let b = board(&[0, 0, 3, 1, 1, 0, 0, 2], Player::Two);
        let result = search(&b, 1, &KalahRules::default()).unwrap();
        assert_eq!(result.best_move, Some(4));
        assert_eq!(result.score, 4);
    }

    #[test]
    fn test_opponent_minimizes_and_extra_turn_maximizes() {
        let b = board(&[0, 0, 3, 1, 1, 0, 0, 2], Player::One);
        let rules = KalahRules::default();

        // One ply: both moves put a seed in the store, the lower pit wins the tie.
        let shallow = search(&b, 1, &rules).unwrap();
        assert_eq!(shallow, SearchResult { best_move: Some(2), score: 1 });

        // Two plies: after pit 2 the opponent replies with a capture (score 0),
        // after pit 3 One moves again and picks up another seed (score 2).
        let deep = search(&b, 2, &rules).unwrap();
        assert_eq!(deep, SearchResult { best_move: Some(3), score: 2 });
    }

    #[test]
    fn test_standard_opening_lines() {
        let b = Board::standard(Player::One);
        let rules = KalahRules::default();
        let (result, stats) = search_with_stats(&b, 2, &rules).unwrap();
        assert_eq!(result, SearchResult { best_move: Some(2), score: 2 });
        assert_eq!(stats, SearchStats { nodes: 42, leaves: 35 });

        let (result, stats) = search_with_stats(&b, 4, &rules).unwrap();
        assert_eq!(result, SearchResult { best_move: Some(5), score: 1 });
        assert_eq!(stats, SearchStats { nodes: 1169, leaves: 942 });
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rules = KalahRules::default();
        for player in [Player::One, Player::Two] {
            let b = Board::standard(player);
            for depth in 0..5 {
                let seq = search_with_stats(&b, depth, &rules).unwrap();
                let par = search_parallel(&b, depth, &rules).unwrap();
                assert_eq!(seq, par, "depth {depth} {player}");
            }
        }
    }

    #[test]
    fn test_node_counts_depth_one() {
        let b = Board::standard(Player::One);
        let (_, stats) = search_with_stats(&b, 1, &KalahRules::default()).unwrap();
        assert_eq!(stats.nodes, 7);
        assert_eq!(stats.leaves, 6);
    }

    #[test]
    fn test_search_is_deterministic() {
        let b = board(&[3, 1, 4, 1, 5, 9, 2, 6, 5, 3], Player::Two);
        let rules = KalahRules::default();
        let first = search(&b, 4, &rules).unwrap();
        for _ in 0..3 {
            assert_eq!(search(&b, 4, &rules).unwrap(), first);
        }
    }
}
