//! Replay scoring on the standard board.
//!
//! A game is given as a list of two-digit actions `pd`: `p` is the player
//! (1 or 2), `d` the pit on that player's side counted from 1. Replaying
//! stops at the first illegal action; otherwise the outcome reports the final
//! score from one player's point of view.
//!
//! A [`Snapshot`] is the other view of a recorded game: the fourteen slots of
//! the board after the last action plus one status slot.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::board::{Board, Player, Slot};
use crate::constants::{
    CODE_FINISHED, CODE_ILLEGAL, CODE_IN_PROGRESS, PITS_PER_SIDE, SNAPSHOT_BASE, STANDARD_PITS,
    STANDARD_SLOTS,
};
use crate::error::{MancalaError, Result};
use crate::rules::{KalahRules, SowingRules};

/// One move in `pd` notation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub player: Player,
    /// Pit on the player's own side, `1..=6`
    pub pit: usize,
}

impl Action {
    /// Parse a two-digit action code such as `13` or `26`.
    pub fn parse(code: i32) -> Result<Self> {
        let player = Player::from_number(code / 10)
            .map_err(|_| MancalaError::invalid(format!("action {code}: bad player digit")))?;
        let pit = code % 10;
        if !(1..=PITS_PER_SIDE as i32).contains(&pit) {
            return Err(MancalaError::invalid(format!("action {code}: bad pit digit")));
        }
        Ok(Self {
            player,
            pit: pit as usize,
        })
    }

    pub fn code(self) -> i32 {
        self.player.number() * 10 + self.pit as i32
    }

    /// The action sowing pit `idx` of the standard board.
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= STANDARD_PITS {
            return None;
        }
        let player = if idx < PITS_PER_SIDE { Player::One } else { Player::Two };
        Some(Self {
            player,
            pit: idx % PITS_PER_SIDE + 1,
        })
    }

    /// Index of the pit on the standard board.
    pub fn index(self) -> usize {
        let offset = match self.player {
            Player::One => 0,
            Player::Two => PITS_PER_SIDE,
        };
        offset + self.pit - 1
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Action {
    type Err = MancalaError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s
            .trim()
            .parse::<i32>()
            .map_err(|_| MancalaError::invalid(format!("action {s:?} is not a number")))?;
        Self::parse(code)
    }
}

/// How a replay ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// Action `step` (0-based) could not be played
    Illegal { step: usize },
    /// The game ended; perspective player's store minus the opponent's
    Finished { margin: i64 },
    /// The game goes on; perspective player's store
    InProgress { store: u32 },
}

impl ReplayOutcome {
    /// Numeric outcome code: 30000 + step, 15000 + margin, or 20000 + store.
    pub fn code(self) -> i32 {
        match self {
            ReplayOutcome::Illegal { step } => CODE_ILLEGAL + step as i32,
            ReplayOutcome::Finished { margin } => CODE_FINISHED + margin as i32,
            ReplayOutcome::InProgress { store } => CODE_IN_PROGRESS + store as i32,
        }
    }
}

/// Play one recorded action, or `None` if it cannot be played on `board`.
fn act(rules: &KalahRules, board: &Board, step: usize, code: i32) -> Option<Board> {
    if board.is_finished() {
        debug!("action {step} ({code}) after the game ended");
        return None;
    }
    let action = match Action::parse(code) {
        Ok(a) if a.player == board.player() => a,
        Ok(_) => {
            debug!("action {step} ({code}) out of turn");
            return None;
        }
        Err(e) => {
            debug!("action {step}: {e}");
            return None;
        }
    };
    match rules.apply_sow(board, action.index()) {
        Ok(next) => Some(next),
        Err(e) => {
            debug!("action {step}: {e}");
            None
        }
    }
}

/// The board after playing `actions` from the standard opening, or the
/// index of the first action that could not be played.
pub fn play_out(first: Player, actions: &[i32]) -> std::result::Result<Board, usize> {
    let rules = KalahRules::default();
    let mut board = Board::standard(first);

    for (step, &code) in actions.iter().enumerate() {
        board = act(&rules, &board, step, code).ok_or(step)?;
    }
    Ok(board)
}

/// Replay `actions` with `first` to move and score for `perspective`.
pub fn replay(perspective: Player, first: Player, actions: &[i32]) -> ReplayOutcome {
    let board = match play_out(first, actions) {
        Ok(board) => board,
        Err(step) => return ReplayOutcome::Illegal { step },
    };
    let mine = board.store(perspective);
    if board.is_finished() {
        let theirs = board.store(perspective.opponent());
        ReplayOutcome::Finished {
            margin: mine as i64 - theirs as i64,
        }
    } else {
        ReplayOutcome::InProgress { store: mine }
    }
}

/// Replay with `flag` as both the first mover and the scoring perspective,
/// returning the numeric outcome code.
pub fn replay_result(flag: i32, actions: &[i32]) -> Result<i32> {
    let player = Player::from_number(flag)?;
    Ok(replay(player, player, actions).code())
}

/// Status slot of a [`Snapshot`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// The last action was illegal and forfeits the game: the offender keeps
    /// only its own store, the opponent is credited with every other seed.
    /// Margin is player One's.
    Forfeit { margin: i64 },
    /// The game ended; player One's store minus player Two's
    Finished { margin: i64 },
    /// The game goes on with this player to move
    ToMove(Player),
}

impl SnapshotStatus {
    /// `200 + margin` for a decided game, otherwise the number of the player to move.
    pub fn code(self) -> i32 {
        match self {
            SnapshotStatus::Forfeit { margin } | SnapshotStatus::Finished { margin } => {
                SNAPSHOT_BASE + margin as i32
            }
            SnapshotStatus::ToMove(player) => player.number(),
        }
    }
}

/// The board after a recorded game and the state it was left in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub status: SnapshotStatus,
}

impl Snapshot {
    /// The fourteen board slots in sowing order (player One's pits, store
    /// One, player Two's pits, store Two) followed by the status code.
    pub fn to_slots(&self) -> [i32; STANDARD_SLOTS + 1] {
        let mut slots = [0; STANDARD_SLOTS + 1];
        for (pos, slot) in slots.iter_mut().take(STANDARD_SLOTS).enumerate() {
            *slot = match self.board.slot_at(pos) {
                Slot::Pit(idx) => self.board.pits()[idx] as i32,
                Slot::Store(owner) => self.board.store(owner) as i32,
            };
        }
        slots[STANDARD_SLOTS] = self.status.code();
        slots
    }
}

/// Replay a recorded game for `perspective` and take a snapshot.
///
/// The first mover is the player digit of the first action. Every action
/// but the last is played if it can be and skipped otherwise; only the last
/// one decides the status. An illegal last action is a forfeit by
/// `perspective`.
///
/// # Errors
/// `InvalidArgument` when `actions` is empty or the first action does not
/// name player 1 or 2.
pub fn snapshot(perspective: Player, actions: &[i32]) -> Result<Snapshot> {
    let Some((&last, earlier)) = actions.split_last() else {
        return Err(MancalaError::invalid("snapshot needs at least one action"));
    };
    let first = Player::from_number(actions[0] / 10)?;
    let rules = KalahRules::default();
    let mut board = Board::standard(first);

    for (step, &code) in earlier.iter().enumerate() {
        if let Some(next) = act(&rules, &board, step, code) {
            board = next;
        }
    }

    let status = match act(&rules, &board, earlier.len(), last) {
        None => {
            let kept = board.store(perspective) as i64;
            let margin = kept - (board.total_seeds() as i64 - kept);
            SnapshotStatus::Forfeit {
                margin: match perspective {
                    Player::One => margin,
                    Player::Two => -margin,
                },
            }
        }
        Some(next) => {
            board = next;
            if board.is_finished() {
                SnapshotStatus::Finished {
                    margin: board.store(Player::One) as i64 - board.store(Player::Two) as i64,
                }
            } else {
                SnapshotStatus::ToMove(board.player())
            }
        }
    };
    debug!("snapshot after {} actions: {status:?}", actions.len());
    Ok(Snapshot { board, status })
}

/// Snapshot slots for the raw `flag` (1 or 2): fourteen board slots and
/// the status code.
pub fn board_snapshot(flag: i32, actions: &[i32]) -> Result<[i32; STANDARD_SLOTS + 1]> {
    let perspective = Player::from_number(flag)?;
    Ok(snapshot(perspective, actions)?.to_slots())
}
