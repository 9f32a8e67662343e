//! Scoring module - classic line clear table

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows at once at `level`.
///
/// Counts outside 1..=4 score nothing.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    match lines {
        1..=4 => LINE_SCORES[lines as usize].saturating_mul(level),
        _ => 0,
    }
}
