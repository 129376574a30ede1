//! Board representation: pit seed counts, the two stores, and the side to move.
//!
//! Pits are indexed `0..N`. Player One owns the first half of the pits
//! (rounded up), player Two the rest. Sowing walks a ring that places each
//! player's store right after that player's last pit:
//!
//! ```text
//! pit 0 .. pit H-1, store One, pit H .. pit N-1, store Two, (back to pit 0)
//! ```
//!
//! With twelve pits this is the classic Kalah ring with stores at ring
//! positions 6 and 13.

use std::fmt;
use std::ops::Range;

use crate::constants::{INITIAL_SEEDS, STANDARD_PITS};
use crate::error::{MancalaError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Parse the wire representation (1 or 2).
    pub fn from_number(n: i32) -> Result<Self> {
        match n {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            _ => Err(MancalaError::invalid(format!("player must be 1 or 2, got {n}"))),
        }
    }

    pub fn number(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// One stop on the sowing ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Pit(usize),
    Store(Player),
}

/// An immutable board snapshot.
///
/// Successor boards are produced by the sowing rules; nothing outside the
/// crate can change a board in place.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pits: Vec<u32>,
    stores: [u32; 2],
    player: Player,
}

impl Board {
    /// Create a board from raw pit counts with both stores empty.
    pub fn new(pits: Vec<u32>, player: Player) -> Result<Self> {
        Self::with_stores(pits, [0, 0], player)
    }

    /// Create a board with pre-filled stores (`[One, Two]`).
    ///
    /// The seed total (pits and stores) must fit in a `u32`. Sowing conserves
    /// the total, so no pit, store, or side sum can overflow afterwards.
    pub fn with_stores(pits: Vec<u32>, stores: [u32; 2], player: Player) -> Result<Self> {
        if pits.is_empty() {
            return Err(MancalaError::invalid("board must have at least one pit"));
        }
        let board = Self {
            pits,
            stores,
            player,
        };
        let total = board.total_seeds();
        if total > u64::from(u32::MAX) {
            return Err(MancalaError::invalid(format!(
                "board holds {total} seeds, at most {} are supported",
                u32::MAX
            )));
        }
        Ok(board)
    }

    /// The standard Kalah opening: six pits a side, four seeds each.
    pub fn standard(player: Player) -> Self {
        Self {
            pits: vec![INITIAL_SEEDS; STANDARD_PITS],
            stores: [0, 0],
            player,
        }
    }

    pub fn pits(&self) -> &[u32] {
        &self.pits
    }

    /// Seeds in a pit, or `None` past the end of the board.
    pub fn pit(&self, idx: usize) -> Option<u32> {
        self.pits.get(idx).copied()
    }

    pub fn stores(&self) -> [u32; 2] {
        self.stores
    }

    pub fn store(&self, player: Player) -> u32 {
        self.stores[player.index()]
    }

    /// The player to move.
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn len(&self) -> usize {
        self.pits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pits.is_empty()
    }

    /// Number of pits owned by player One.
    #[inline]
    fn split(&self) -> usize {
        self.pits.len().div_ceil(2)
    }

    /// The pit indices owned by `player`. May be empty for a one-pit board.
    pub fn side(&self, player: Player) -> Range<usize> {
        let h = self.split();
        match player {
            Player::One => 0..h,
            Player::Two => h..self.pits.len(),
        }
    }

    /// The owner of a pit, or `None` past the end of the board.
    pub fn owner(&self, idx: usize) -> Option<Player> {
        if idx >= self.pits.len() {
            None
        } else if idx < self.split() {
            Some(Player::One)
        } else {
            Some(Player::Two)
        }
    }

    /// The pit facing `idx` across the board.
    pub fn opposite(&self, idx: usize) -> usize {
        self.pits.len() - 1 - idx
    }

    /// Seeds on `player`'s side, stores excluded.
    pub fn side_seeds(&self, player: Player) -> u32 {
        self.pits[self.side(player)].iter().sum()
    }

    /// Seeds on the whole board, stores included.
    pub fn total_seeds(&self) -> u64 {
        self.pits.iter().map(|&s| s as u64).sum::<u64>()
            + self.stores.iter().map(|&s| s as u64).sum::<u64>()
    }

    /// True once every pit has been emptied into the stores.
    pub fn is_finished(&self) -> bool {
        self.pits.iter().all(|&s| s == 0)
    }

    // -------------------------------------------------------------------------
    // Sowing ring (used by the rules)
    // -------------------------------------------------------------------------

    /// Length of the sowing ring: every pit plus both stores.
    pub(crate) fn ring_len(&self) -> usize {
        self.pits.len() + 2
    }

    pub(crate) fn ring_position(&self, idx: usize) -> usize {
        if idx < self.split() { idx } else { idx + 1 }
    }

    pub(crate) fn slot_at(&self, pos: usize) -> Slot {
        let h = self.split();
        match pos {
            p if p < h => Slot::Pit(p),
            p if p == h => Slot::Store(Player::One),
            p if p <= self.pits.len() => Slot::Pit(p - 1),
            _ => Slot::Store(Player::Two),
        }
    }

    pub(crate) fn pits_mut(&mut self) -> &mut [u32] {
        &mut self.pits
    }

    pub(crate) fn add_to_store(&mut self, player: Player, seeds: u32) {
        self.stores[player.index()] += seeds;
    }

    pub(crate) fn set_player(&mut self, player: Player) {
        self.player = player;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Player Two's row runs right to left across the top.
        write!(f, "     ")?;
        for idx in self.side(Player::Two).rev() {
            write!(f, "{:>4}", self.pits[idx])?;
        }
        writeln!(f)?;

        let width = 4 * self.side(Player::One).len().max(self.side(Player::Two).len());
        writeln!(
            f,
            "{:>4} {:width$}{:>4}",
            self.stores[1],
            "",
            self.stores[0],
            width = width
        )?;

        write!(f, "     ")?;
        for idx in self.side(Player::One) {
            write!(f, "{:>4}", self.pits[idx])?;
        }
        writeln!(f)?;
        writeln!(f, "to move: {}", self.player)
    }
}
