//! Packing of the search depth and the chosen move into one integer.
//!
//! `encoded = (depth + 1) * 10000 + (pit + 1)`: the leading digits carry the
//! depth, the trailing four digits the 1-based pit. The score is not encoded.

use crate::constants::{ENCODING_BASE, MAX_DEPTH, MAX_PITS};
use crate::error::{MancalaError, Result};

/// Encode a depth and a root pit index.
///
/// # Errors
/// `InvalidArgument` if the depth or the pit does not fit its field.
pub fn encode(depth: u32, pit: usize) -> Result<i32> {
    if depth > MAX_DEPTH as u32 {
        return Err(MancalaError::invalid(format!(
            "depth {depth} exceeds the encodable maximum {MAX_DEPTH}"
        )));
    }
    if pit >= MAX_PITS {
        return Err(MancalaError::invalid(format!(
            "pit {pit} does not fit the four-digit move field"
        )));
    }
    Ok((depth as i32 + 1) * ENCODING_BASE + pit as i32 + 1)
}

/// Split an encoded result back into `(depth, pit)`.
///
/// Returns `None` for values no call to [`encode`] can produce.
pub fn decode(value: i32) -> Option<(u32, usize)> {
    let depth = value / ENCODING_BASE - 1;
    let pit = value % ENCODING_BASE - 1;
    if depth < 0 || pit < 0 {
        return None;
    }
    Some((depth as u32, pit as usize))
}
