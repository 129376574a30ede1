//! Public entry point: argument validation, configuration, and the encoded verdict.

use log::debug;

use crate::board::{Board, Player};
use crate::constants::{ACTION_DEPTH, MAX_DEPTH, MAX_PITS, PITS_PER_SIDE, STANDARD_SLOTS};
use crate::encode::encode;
use crate::error::{MancalaError, Result};
use crate::replay::Action;
use crate::rules::{KalahRules, RuleConfig, SowingRules};
use crate::search::{SearchConfig, SearchResult, SearchStats, search_parallel, search_with_stats};

/// Runtime configuration for an [`Engine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub rules: RuleConfig,
    pub search: SearchConfig,
}

impl EngineConfig {
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.search.parallel = parallel;
        self
    }
}

/// A rule set plus search settings.
pub struct Engine<R = KalahRules> {
    rules: R,
    search: SearchConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Kalah rules with every optional rule enabled, sequential search.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            rules: KalahRules::new(config.rules),
            search: config.search,
        }
    }
}

impl<R: SowingRules + Sync> Engine<R> {
    /// Use a custom rule set.
    pub fn with_rules(rules: R, search: SearchConfig) -> Self {
        Self { rules, search }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Search `board` to `depth` plies and return the structured result.
    pub fn evaluate(&self, board: &Board, depth: u32) -> Result<(SearchResult, SearchStats)> {
        let (result, stats) = if self.search.parallel {
            search_parallel(board, depth, &self.rules)?
        } else {
            search_with_stats(board, depth, &self.rules)?
        };
        debug!(
            "searched {} nodes ({} leaves) at depth {depth}: best {:?} score {}",
            stats.nodes, stats.leaves, result.best_move, result.score
        );
        Ok((result, stats))
    }

    /// Validate raw arguments, search, and encode the verdict.
    ///
    /// A root with no legal move encodes pit 0 in the move field.
    pub fn result(&self, player: i32, board: &[i32], depth: i32) -> Result<i32> {
        let (board, depth) = parse_arguments(player, board, depth)?;
        let (result, _) = self.evaluate(&board, depth)?;
        encode(depth, result.best_move.unwrap_or(0))
    }

    /// Choose an action in `pd` notation for `flag` on a standard-board
    /// status, searching [`ACTION_DEPTH`] plies.
    ///
    /// When `flag` has no legal move the answer is its pit 1 (`flag * 10 + 1`).
    pub fn best_action(&self, flag: i32, status: &[i32]) -> Result<i32> {
        let board = parse_status(flag, status)?;
        let (result, _) = self.evaluate(&board, ACTION_DEPTH)?;
        let action = match result.best_move.and_then(Action::from_index) {
            Some(action) => action,
            None => Action {
                player: board.player(),
                pit: 1,
            },
        };
        Ok(action.code())
    }
}

/// Check the raw `(player, board, depth)` triple and build the root board.
///
/// # Errors
/// `InvalidArgument` when the player is not 1 or 2, the board is empty, too
/// long, has a negative pit, or holds more than `u32::MAX` seeds in total, or
/// the depth is negative or too large to encode.
pub fn parse_arguments(player: i32, board: &[i32], depth: i32) -> Result<(Board, u32)> {
    let player = Player::from_number(player)?;
    if board.is_empty() {
        return Err(MancalaError::invalid("board must have at least one pit"));
    }
    if board.len() > MAX_PITS {
        return Err(MancalaError::invalid(format!(
            "board has {} pits, at most {MAX_PITS} are supported",
            board.len()
        )));
    }
    if !(0..=MAX_DEPTH).contains(&depth) {
        return Err(MancalaError::invalid(format!(
            "depth must be in 0..={MAX_DEPTH}, got {depth}"
        )));
    }
    let pits = board
        .iter()
        .enumerate()
        .map(|(idx, &seeds)| {
            u32::try_from(seeds).map_err(|_| {
                MancalaError::invalid(format!("pit {idx} has a negative seed count {seeds}"))
            })
        })
        .collect::<Result<Vec<u32>>>()?;

    Ok((Board::new(pits, player)?, depth as u32))
}

/// Build a standard board from its fourteen slots in sowing order: player
/// One's six pits, store One, player Two's six pits, store Two.
///
/// # Errors
/// `InvalidArgument` when `flag` is not 1 or 2, the status does not have
/// fourteen slots, or a slot is negative.
pub fn parse_status(flag: i32, status: &[i32]) -> Result<Board> {
    let player = Player::from_number(flag)?;
    if status.len() != STANDARD_SLOTS {
        return Err(MancalaError::invalid(format!(
            "status must have {STANDARD_SLOTS} slots, got {}",
            status.len()
        )));
    }
    let slots = status
        .iter()
        .enumerate()
        .map(|(idx, &seeds)| {
            u32::try_from(seeds).map_err(|_| {
                MancalaError::invalid(format!("slot {idx} has a negative seed count {seeds}"))
            })
        })
        .collect::<Result<Vec<u32>>>()?;

    let (one, two) = slots.split_at(PITS_PER_SIDE + 1);
    let pits = one[..PITS_PER_SIDE]
        .iter()
        .chain(&two[..PITS_PER_SIDE])
        .copied()
        .collect();
    Board::with_stores(pits, [one[PITS_PER_SIDE], two[PITS_PER_SIDE]], player)
}

/// Pick an action for `flag` on a fourteen-slot standard status.
///
/// The root moves are split across the rayon pool; the answer is the same
/// as a sequential search.
///
/// ```
/// use mancala_rust::engine::best_action;
///
/// // Player 2's only non-empty pit is its sixth.
/// let status = [0, 1, 4, 13, 11, 0, 3, 0, 0, 0, 0, 0, 1, 15];
/// assert_eq!(best_action(2, &status), Ok(26));
/// ```
pub fn best_action(flag: i32, status: &[i32]) -> Result<i32> {
    Engine::with_config(EngineConfig::default().with_parallel(true)).best_action(flag, status)
}

/// Evaluate `board` for `player` to `depth` plies with the default engine.
///
/// Returns `(depth + 1) * 10000 + (best pit + 1)`.
///
/// ```
/// use mancala_rust::mancala_result;
///
/// assert_eq!(mancala_result(1, &[11, 12], 2), Ok(30001));
/// assert_eq!(mancala_result(1, &[14], 1), Ok(20001));
/// ```
pub fn mancala_result(player: i32, board: &[i32], depth: i32) -> Result<i32> {
    Engine::new().result(player, board, depth)
}
