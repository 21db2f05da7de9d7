//! Hold mechanic
//!
//! The active piece can be set aside once per spawned piece. The held piece
//! is always stored in its canonical orientation.

use crate::game_state::GameState;

/// Swap the active piece into the hold slot
///
/// No-op when nothing is falling, the hold was already used for this piece,
/// or the game is paused or over.
///
/// - Empty hold: the queued next piece spawns and a new next piece is drawn.
/// - Occupied hold: the held piece spawns and the next piece is untouched.
///
/// Either way the piece spawns centered on the top row; if that position is
/// blocked the game ends.
pub fn hold(state: &GameState) -> GameState {
    if !state.is_playable() || !state.can_hold {
        return state.clone();
    }
    let Some(active) = state.active else {
        return state.clone();
    };

    let from_hold = state.held;
    let cleared = GameState {
        active: None,
        held: Some(active.tetromino.canonical()),
        ..state.clone()
    };

    let mut out = cleared.spawn_piece(from_hold);
    out.can_hold = false;
    out
}
