//! Scoring module - chain bonus rules
//!
//! A chain is scored once, when it ends:
//! - `score_delta = total_cleared * POINTS_PER_CELL * bonus`
//! - `bonus = 1` for a single clearing pass, `2^(chain - 1)` for longer chains
//! - a lock that clears nothing scores nothing

use crate::types::POINTS_PER_CELL;

/// Chain bonus multiplier for a chain of `chain` clearing passes
///
/// # Examples
///
/// ```
/// use puyo_engine_core::chain_bonus;
///
/// assert_eq!(chain_bonus(0), 1);
/// assert_eq!(chain_bonus(1), 1);
/// assert_eq!(chain_bonus(2), 2);
/// assert_eq!(chain_bonus(4), 8);
/// ```
pub fn chain_bonus(chain: u32) -> u32 {
    if chain <= 1 {
        return 1;
    }
    1u32.checked_shl(chain - 1).unwrap_or(u32::MAX)
}

/// Score awarded when a chain of `chain` passes removing `total_cleared`
/// cells in total comes to rest.
pub fn chain_score(total_cleared: u32, chain: u32) -> u32 {
    if chain == 0 || total_cleared == 0 {
        return 0;
    }
    total_cleared
        .saturating_mul(POINTS_PER_CELL)
        .saturating_mul(chain_bonus(chain))
}
