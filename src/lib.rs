//! Mancala-Rust: a small minimax engine for Kalah-style pit-sowing games.
//!
//! The engine evaluates a board for the player to move, searches a fixed
//! number of plies, and reports the chosen pit packed together with the
//! search depth into one integer.
//!
//! ## Modules
//!
//! - [`board`] - Pit counts, stores, side to move
//! - [`movegen`] - Legal move generation
//! - [`rules`] - Sowing rules (captures, extra turns, end-of-game sweep)
//! - [`search`] - Depth-bounded minimax, sequential or split across threads
//! - [`encode`] - Packing of depth and move into the result integer
//! - [`engine`] - Argument validation, the [`mancala_result`] entry point, and
//!   [`best_action`] for standard-board statuses
//! - [`replay`] - Outcome codes and board snapshots for recorded games on the
//!   standard board
//! - [`playout`] - Random playouts
//!
//! ## Example
//!
//! ```
//! use mancala_rust::board::{Board, Player};
//! use mancala_rust::rules::KalahRules;
//! use mancala_rust::search::search;
//!
//! // Encoded verdict for player 1 on a two-pit board, two plies deep
//! assert_eq!(mancala_rust::mancala_result(1, &[11, 12], 2), Ok(30001));
//!
//! // Structured search on the standard opening
//! let board = Board::standard(Player::One);
//! let result = search(&board, 2, &KalahRules::default()).unwrap();
//! println!("best pit: {:?}, score {}", result.best_move, result.score);
//! ```

pub mod board;
pub mod constants;
pub mod encode;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod playout;
pub mod replay;
pub mod rules;
pub mod search;

pub use crate::engine::{Engine, EngineConfig, best_action, mancala_result};
pub use crate::error::{IllegalReason, MancalaError};
