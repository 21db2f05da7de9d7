//! Lock & clear pipeline
//!
//! Runs when a downward move is blocked: merge the piece, clear full rows,
//! score the clear and advance the line count and level. The pipeline is a
//! pure function of its inputs, so a failure leaves the caller's state as it
//! was.

use crate::board::Grid;
use crate::collision::ActivePiece;
use crate::error::EngineError;
use crate::scoring::{level_for_lines, line_clear_score};
use crate::types::PieceKind;

/// What a single lock did (kept on the session for observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_delta: u32,
}

/// Counters and grid after a lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    pub grid: Grid,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub event: LockEvent,
}

/// Lock `active` into `grid` and compute the new counters
///
/// Scoring uses `level`, the level before this lock's lines are counted.
pub fn lock_piece(
    grid: &Grid,
    active: &ActivePiece,
    score: u32,
    lines: u32,
    level: u32,
) -> Result<LockOutcome, EngineError> {
    let mut grid = grid.merge(
        &active.tetromino.shape,
        active.position.x,
        active.position.y,
        active.tetromino.kind,
    );
    let cleared = grid.clear_full_rows_in_place();
    let score_delta = line_clear_score(cleared, level)?;

    let lines = lines.saturating_add(cleared as u32);
    Ok(LockOutcome {
        grid,
        score: score.saturating_add(score_delta),
        lines,
        level: level_for_lines(lines),
        event: LockEvent {
            kind: active.tetromino.kind,
            lines_cleared: cleared as u32,
            score_delta,
        },
    })
}
