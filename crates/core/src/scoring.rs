//! Scoring module - line clear points, levels and descent pacing
//!
//! - A lock that clears `n` rows scores `LINE_SCORES[n] * level`, using the
//!   level in force before the clear.
//! - The level is always derived from total lines: `lines / 10 + 1`.
//! - The descent interval shrinks geometrically per level down to a floor.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows at once at `level`
///
/// More rows than the table covers is a defect upstream, not a silent zero.
pub fn line_clear_score(lines: usize, level: u32) -> Result<u32, EngineError> {
    LINE_SCORES
        .get(lines)
        .map(|&base| base.saturating_mul(level))
        .ok_or(EngineError::ClearedRowsOutOfRange { count: lines })
}

/// Level for a total cleared-line count (levels start at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Descent interval in milliseconds for a level
///
/// `max(min_speed, initial_speed * decay^(level - 1))`, computed in full
/// precision.
pub fn descent_interval_ms(level: u32, config: &EngineConfig) -> f64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let interval = config.initial_speed_ms * config.speed_decay.powi(exponent);
    interval.max(config.min_speed_ms)
}
