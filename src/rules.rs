//! Sowing rules.
//!
//! The search only talks to the [`SowingRules`] trait, so a different rule
//! set can be dropped in without touching it. [`KalahRules`] implements the
//! classic Kalah rules, with each optional rule switchable through
//! [`RuleConfig`].

use log::trace;

use crate::board::{Board, Player, Slot};
use crate::error::Result;
use crate::movegen::check_legal;

/// A rule set that turns a board and a chosen pit into the successor board.
pub trait SowingRules {
    /// Sow the seeds of `pit` for the player to move.
    ///
    /// # Errors
    /// `MancalaError::IllegalMove` if `pit` is out of range, empty, or not
    /// owned by the player to move.
    fn apply_sow(&self, board: &Board, pit: usize) -> Result<Board>;
}

/// Switches for the optional Kalah rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleConfig {
    /// Last seed in an own empty pit captures the opposite pit
    pub captures: bool,
    /// Last seed in the mover's store grants another move
    pub extra_turn: bool,
    /// When a side runs out of seeds, the rest go to their owners' stores
    pub sweep_on_empty_side: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            captures: true,
            extra_turn: true,
            sweep_on_empty_side: true,
        }
    }
}

/// Kalah sowing: counter-clockwise, skipping the opponent's store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KalahRules {
    pub config: RuleConfig,
}

impl KalahRules {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    /// Capture the opposite pit if the last seed landed in an own, previously empty pit.
    fn try_capture(&self, board: &mut Board, mover: Player, last: usize) {
        if board.owner(last) != Some(mover) || board.pits()[last] != 1 {
            return;
        }
        let opp = board.opposite(last);
        if board.owner(opp) != Some(mover.opponent()) || board.pits()[opp] == 0 {
            return;
        }
        let pits = board.pits_mut();
        let captured = pits[opp] + 1;
        pits[opp] = 0;
        pits[last] = 0;
        board.add_to_store(mover, captured);
        trace!("{mover} captures {captured} seeds at pits {last}/{opp}");
    }

    /// Move every seed left on the board into its owner's store once a side is empty.
    fn try_sweep(&self, board: &mut Board) {
        if board.side_seeds(Player::One) > 0 && board.side_seeds(Player::Two) > 0 {
            return;
        }
        for player in [Player::One, Player::Two] {
            let side = board.side(player);
            let seeds: u32 = board.pits()[side.clone()].iter().sum();
            board.pits_mut()[side].fill(0);
            board.add_to_store(player, seeds);
        }
        trace!("side empty, game over: stores {:?}", board.stores());
    }
}

impl SowingRules for KalahRules {
    fn apply_sow(&self, board: &Board, pit: usize) -> Result<Board> {
        check_legal(board, pit)?;

        let mover = board.player();
        let mut next = board.clone();
        let mut seeds = std::mem::take(&mut next.pits_mut()[pit]);

        let ring = next.ring_len();
        let mut pos = next.ring_position(pit);
        let mut last = Slot::Pit(pit);

        // Each full lap drops one seed in every slot but the opponent's store,
        // the emptied pit included. At least one seed is left for the loop so
        // `last` is always set by a real drop.
        let lap = u32::try_from(ring - 1).unwrap_or(u32::MAX);
        let laps = (seeds - 1) / lap;
        if laps > 0 {
            next.pits_mut().iter_mut().for_each(|s| *s += laps);
            next.add_to_store(mover, laps);
            seeds -= laps * lap;
            trace!("{mover} sows {laps} full laps from pit {pit}");
        }

        while seeds > 0 {
            pos = (pos + 1) % ring;
            let slot = next.slot_at(pos);
            match slot {
                Slot::Store(owner) if owner != mover => continue,
                Slot::Store(owner) => next.add_to_store(owner, 1),
                Slot::Pit(idx) => next.pits_mut()[idx] += 1,
            }
            last = slot;
            seeds -= 1;
        }

        let again = self.config.extra_turn && last == Slot::Store(mover);
        if let Slot::Pit(idx) = last {
            if self.config.captures {
                self.try_capture(&mut next, mover, idx);
            }
        }
        if self.config.sweep_on_empty_side {
            self.try_sweep(&mut next);
        }

        next.set_player(if again { mover } else { mover.opponent() });
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IllegalReason, MancalaError};

    fn sow(board: &Board, pit: usize) -> Board {
        KalahRules::default().apply_sow(board, pit).unwrap()
    }

    #[test]
    fn test_simple_sow_switches_player() {
        let board = sow(&Board::standard(Player::One), 0);
        assert_eq!(board.pits(), &[0, 5, 5, 5, 5, 4, 4, 4, 4, 4, 4, 4]);
        assert_eq!(board.stores(), [0, 0]);
        assert_eq!(board.player(), Player::Two);
    }

    #[test]
    fn test_last_seed_in_store_gives_extra_turn() {
        let board = sow(&Board::standard(Player::One), 2);
        assert_eq!(board.pits(), &[4, 4, 0, 5, 5, 5, 4, 4, 4, 4, 4, 4]);
        assert_eq!(board.stores(), [1, 0]);
        assert_eq!(board.player(), Player::One);
    }

    #[test]
    fn test_extra_turn_can_be_disabled() {
        let rules = KalahRules::new(RuleConfig {
            extra_turn: false,
            ..RuleConfig::default()
        });
        let board = rules.apply_sow(&Board::standard(Player::One), 2).unwrap();
        assert_eq!(board.stores(), [1, 0]);
        assert_eq!(board.player(), Player::Two);
    }

    #[test]
    fn test_player_two_store_is_last_in_ring() {
        let board = sow(&Board::standard(Player::Two), 8);
        assert_eq!(board.pits(), &[4, 4, 4, 4, 4, 4, 4, 4, 0, 5, 5, 5]);
        assert_eq!(board.stores(), [0, 1]);
        assert_eq!(board.player(), Player::Two);
    }

    #[test]
    fn test_capture_opposite_pit() {
        let start = Board::new(vec![1, 0, 0, 0, 0, 2, 3, 0, 0, 0, 5, 0], Player::One).unwrap();
        let board = sow(&start, 0);
        assert_eq!(board.pits(), &[0, 0, 0, 0, 0, 2, 3, 0, 0, 0, 0, 0]);
        assert_eq!(board.stores(), [6, 0]);
        assert_eq!(board.player(), Player::Two);
    }

    #[test]
    fn test_no_capture_when_disabled() {
        let rules = KalahRules::new(RuleConfig {
            captures: false,
            ..RuleConfig::default()
        });
        let start = Board::new(vec![1, 0, 0, 0, 0, 2, 3, 0, 0, 0, 5, 0], Player::One).unwrap();
        let board = rules.apply_sow(&start, 0).unwrap();
        assert_eq!(board.pits(), &[0, 1, 0, 0, 0, 2, 3, 0, 0, 0, 5, 0]);
        assert_eq!(board.stores(), [0, 0]);
    }

    #[test]
    fn test_no_capture_from_empty_opposite() {
        let start = Board::new(vec![1, 0, 0, 0, 0, 2, 3, 0, 0, 0, 0, 1], Player::One).unwrap();
        let board = sow(&start, 0);
        assert_eq!(board.pits(), &[0, 1, 0, 0, 0, 2, 3, 0, 0, 0, 0, 1]);
        assert_eq!(board.stores(), [0, 0]);
    }

    #[test]
    fn test_wraparound_skips_opponent_store_then_captures() {
        let start = Board::new(vec![0, 0, 0, 0, 0, 9, 1, 1, 1, 1, 1, 1], Player::One).unwrap();
        let board = sow(&start, 5);
        assert_eq!(board.pits(), &[1, 0, 0, 0, 0, 0, 2, 2, 2, 2, 0, 2]);
        assert_eq!(board.stores(), [4, 0]);
        assert_eq!(board.player(), Player::Two);
        assert_eq!(board.total_seeds(), start.total_seeds());
    }

    #[test]
    fn test_sweep_when_side_empties() {
        let start = Board::new(vec![0, 0, 0, 0, 0, 1, 2, 0, 3, 0, 0, 1], Player::One).unwrap();
        let board = sow(&start, 5);
        assert!(board.is_finished());
        assert_eq!(board.stores(), [1, 6]);
        assert_eq!(board.player(), Player::One);
    }

    #[test]
    fn test_single_pit_board_sows_into_own_store() {
        let board = sow(&Board::new(vec![14], Player::One).unwrap(), 0);
        assert_eq!(board.pits(), &[0]);
        assert_eq!(board.stores(), [14, 0]);
        assert_eq!(board.player(), Player::One);
        assert!(board.is_finished());
    }

    #[test]
    fn test_full_laps_match_seed_by_seed_sowing() {
        // 13 seeds on the standard ring: one full lap back into the emptied
        // pit, which then captures.
        let start = Board::new(vec![0, 0, 0, 0, 0, 13, 1, 0, 0, 0, 0, 0], Player::One).unwrap();
        let board = sow(&start, 5);
        assert_eq!(board.pits(), &[1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1]);
        assert_eq!(board.stores(), [4, 0]);
        assert_eq!(board.player(), Player::Two);

        // 10 seeds on a four-pit ring of six slots: one lap, then five more.
        let start = Board::new(vec![10, 0, 0, 0], Player::One).unwrap();
        let board = sow(&start, 0);
        assert_eq!(board.pits(), &[2, 2, 2, 2]);
        assert_eq!(board.stores(), [2, 0]);
        assert_eq!(board.player(), Player::Two);
    }

    #[test]
    fn test_large_pit_sows_without_overflow() {
        let seeds = u32::MAX - 1;
        let start = Board::new(vec![seeds, 0, 0, 1], Player::One).unwrap();
        let board = sow(&start, 0);
        assert_eq!(board.total_seeds(), start.total_seeds());
        assert_eq!(board.player(), Player::Two);
    }

    #[test]
    fn test_illegal_moves_rejected() {
        let rules = KalahRules::default();
        let board = Board::new(vec![0, 4, 4, 4], Player::One).unwrap();
        assert_eq!(
            rules.apply_sow(&board, 0),
            Err(MancalaError::IllegalMove { pit: 0, reason: IllegalReason::Empty })
        );
        assert_eq!(
            rules.apply_sow(&board, 3),
            Err(MancalaError::IllegalMove { pit: 3, reason: IllegalReason::NotOwned })
        );
        assert_eq!(
            rules.apply_sow(&board, 4),
            Err(MancalaError::IllegalMove { pit: 4, reason: IllegalReason::OutOfRange })
        );
    }

    #[test]
    fn test_input_board_untouched() {
        let start = Board::standard(Player::One);
        let copy = start.clone();
        let _ = sow(&start, 3);
        assert_eq!(start, copy);
    }
}
