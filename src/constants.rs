//! Constants for the standard board, result encoding, and search defaults.
//!
//! The engine accepts boards of any length, but the replay scorer and the
//! demo game always play on the standard 6+6 Kalah layout defined here.

// =============================================================================
// Standard Board Geometry
// =============================================================================

/// Pits on each side of the standard board.
pub const PITS_PER_SIDE: usize = 6;

/// Total pits on the standard board (stores not included).
pub const STANDARD_PITS: usize = PITS_PER_SIDE * 2;

/// Pits plus both stores, in sowing order.
pub const STANDARD_SLOTS: usize = STANDARD_PITS + 2;

/// Seeds placed in every pit at the start of a standard game.
pub const INITIAL_SEEDS: u32 = 4;

// =============================================================================
// Result Encoding
// =============================================================================

/// Radix separating the depth field from the move field of an encoded result.
pub const ENCODING_BASE: i32 = 10_000;

/// Largest board the move field can represent (move + 1 must stay below the base).
pub const MAX_PITS: usize = (ENCODING_BASE - 1) as usize;

/// Largest depth whose encoding still fits in an `i32`.
pub const MAX_DEPTH: i32 = (i32::MAX - ENCODING_BASE) / ENCODING_BASE - 1;

// =============================================================================
// Replay Outcome Codes
// =============================================================================

/// Base code for a game that finished during the replay (plus the score margin).
pub const CODE_FINISHED: i32 = 15_000;

/// Base code for a game still in progress (plus the player's store).
pub const CODE_IN_PROGRESS: i32 = 20_000;

/// Base code for an illegal action (plus the 0-based index of that action).
pub const CODE_ILLEGAL: i32 = 30_000;

/// Base of a snapshot's status slot for a decided game (plus player One's margin).
pub const SNAPSHOT_BASE: i32 = 200;

// =============================================================================
// Search Defaults
// =============================================================================

/// Lookahead used to pick an action for a standard-board status, in plies.
pub const ACTION_DEPTH: u32 = 10;

/// Default lookahead for the demo game, in plies.
pub const DEFAULT_DEPTH: u32 = 6;

/// Ply cap for random playouts, well above the length of any real game.
pub const MAX_PLAYOUT_PLIES: usize = 1_000;
