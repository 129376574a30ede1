//! Error types shared by the engine, the sowing rules, and the replay scorer.

use std::fmt;

/// Why a pit cannot be sown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// Index past the end of the board
    OutOfRange,
    /// Pit holds no seeds
    Empty,
    /// Pit belongs to the player not on move
    NotOwned,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::OutOfRange => write!(f, "pit index out of range"),
            IllegalReason::Empty => write!(f, "pit is empty"),
            IllegalReason::NotOwned => write!(f, "pit not owned by the player to move"),
        }
    }
}

/// Errors reported by the public API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MancalaError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("illegal move at pit {pit}: {reason}")]
    IllegalMove { pit: usize, reason: IllegalReason },
}

impl MancalaError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MancalaError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MancalaError>;
