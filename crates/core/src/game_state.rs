//! Game state module - the session state machine
//!
//! [`GameState`] is a value: every transition takes `&self` and returns a new
//! state, so no half-applied action is ever observable. The grid sits behind
//! an `Arc` and is only replaced when a piece locks, which keeps moves and
//! rotations cheap to copy.
//!
//! Spawning is a direct, synchronous step: creating a game and every lock end
//! by spawning the next piece (or reaching game over when the spawn position
//! is blocked).

use std::sync::Arc;
use std::time::Duration;

use crate::board::Grid;
use crate::collision::{check_collision, ActivePiece, Position};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::lock::{lock_piece, LockEvent};
use crate::pieces::{random_tetromino, Tetromino};
use crate::rng::SimpleRng;
use crate::rotation::attempt_rotate;
use crate::scoring::descent_interval_ms;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A piece is falling
    Active,
    /// No active piece; the next spawn is pending
    AwaitingSpawn,
    Paused,
    /// Terminal until reset
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Active => "active",
            Phase::AwaitingSpawn => "awaiting_spawn",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}

/// Spawn position for a piece: horizontally centered, top row
pub fn spawn_position(piece: &Tetromino, cols: usize) -> Position {
    let x = (cols / 2) as i32 - (piece.shape.size() / 2) as i32;
    Position::new(x, 0)
}

/// Complete session state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) config: EngineConfig,
    pub(crate) grid: Arc<Grid>,
    pub(crate) active: Option<ActivePiece>,
    pub(crate) next: Tetromino,
    pub(crate) held: Option<Tetromino>,
    pub(crate) can_hold: bool,
    pub(crate) score: u32,
    pub(crate) lines: u32,
    pub(crate) level: u32,
    pub(crate) game_over: bool,
    pub(crate) paused: bool,
    /// Last lock event (replaced on every lock).
    pub(crate) last_lock: Option<LockEvent>,
    /// Locks since the game started; lets observers tell two identical lock events apart.
    pub(crate) pieces_locked: u32,
    pub(crate) rng: SimpleRng,
}

impl GameState {
    /// Create a new game with the default config and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::fresh(EngineConfig::default(), SimpleRng::new(seed))
    }

    /// Create a new game with a custom config
    pub fn with_config(config: EngineConfig, seed: u32) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::fresh(config, SimpleRng::new(seed)))
    }

    /// Start a game on a prepared grid with a chosen first piece
    ///
    /// The grid must match the configured dimensions. If `first` cannot
    /// spawn, the returned state is already over.
    pub fn from_parts(
        config: EngineConfig,
        grid: Grid,
        first: PieceKind,
        seed: u32,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if grid.rows() != config.rows || grid.cols() != config.cols {
            return Err(EngineError::InvalidConfig(format!(
                "grid is {}x{} but config expects {}x{}",
                grid.rows(),
                grid.cols(),
                config.rows,
                config.cols
            )));
        }
        let state = Self {
            grid: Arc::new(grid),
            next: Tetromino::new(first),
            ..Self::empty(config, SimpleRng::new(seed))
        };
        Ok(state.spawn())
    }

    /// Initial counters, empty grid, no active piece yet
    fn empty(config: EngineConfig, mut rng: SimpleRng) -> Self {
        let next = random_tetromino(&mut rng);
        Self {
            grid: Arc::new(Grid::new(config.rows, config.cols)),
            config,
            active: None,
            next,
            held: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: 1,
            game_over: false,
            paused: false,
            last_lock: None,
            pieces_locked: 0,
            rng,
        }
    }

    fn fresh(config: EngineConfig, rng: SimpleRng) -> Self {
        Self::empty(config, rng).spawn()
    }

    /// Replace the queued next piece
    pub fn with_next(&self, kind: PieceKind) -> Self {
        Self {
            next: Tetromino::new(kind),
            ..self.clone()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> Tetromino {
        self.next
    }

    pub fn held_piece(&self) -> Option<Tetromino> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// The piece generator as it stands (resuming from it continues the sequence)
    pub fn rng(&self) -> SimpleRng {
        self.rng
    }

    /// Neither paused nor over
    pub fn is_playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else if self.active.is_some() {
            Phase::Active
        } else {
            Phase::AwaitingSpawn
        }
    }

    /// Current automatic-descent interval in milliseconds
    ///
    /// `None` while paused or over: descent is suspended.
    pub fn descent_interval_ms(&self) -> Option<f64> {
        self.is_playable()
            .then(|| descent_interval_ms(self.level, &self.config))
    }

    /// [`Self::descent_interval_ms`] as a `Duration`
    ///
    /// Also `None` if the interval does not fit a `Duration`; a validated
    /// config never produces one.
    pub fn descent_interval(&self) -> Option<Duration> {
        self.descent_interval_ms()
            .and_then(|ms| Duration::try_from_secs_f64(ms / 1000.0).ok())
    }

    /// Install the next piece (or `forced`) at the spawn position
    ///
    /// No-op unless the game is playable and awaiting a spawn. A blocked spawn
    /// position ends the game instead. The next piece is refreshed only when
    /// it was consumed.
    pub(crate) fn spawn_piece(&self, forced: Option<Tetromino>) -> Self {
        if self.active.is_some() || !self.is_playable() {
            return self.clone();
        }

        let mut out = self.clone();
        let piece = forced.unwrap_or(out.next);
        let position = spawn_position(&piece, out.config.cols);
        if check_collision(position, &piece.shape, &out.grid) {
            out.game_over = true;
            return out;
        }

        out.active = Some(ActivePiece::new(piece, position));
        if forced.is_none() {
            out.next = random_tetromino(&mut out.rng);
        }
        out.can_hold = true;
        out
    }

    /// Spawn the queued next piece if nothing is falling
    pub fn spawn(&self) -> Self {
        self.spawn_piece(None)
    }

    /// Move the active piece by (dx, dy)
    ///
    /// A blocked downward move locks the piece, clears rows and spawns the
    /// next one. Any other blocked move leaves the state unchanged.
    pub fn try_move(&self, dx: i32, dy: i32) -> Result<Self, EngineError> {
        if !self.is_playable() {
            return Ok(self.clone());
        }
        let Some(active) = self.active else {
            return Ok(self.clone());
        };

        let moved = active.shifted(dx, dy);
        if !moved.collides(&self.grid) {
            return Ok(Self {
                active: Some(moved),
                ..self.clone()
            });
        }

        if dy > 0 {
            return self.lock_and_spawn(&active);
        }
        Ok(self.clone())
    }

    /// Drop the active piece until it locks (no drop bonus)
    pub fn try_hard_drop(&self) -> Result<Self, EngineError> {
        if !self.is_playable() {
            return Ok(self.clone());
        }
        let Some(mut active) = self.active else {
            return Ok(self.clone());
        };

        loop {
            let down = active.shifted(0, 1);
            if down.collides(&self.grid) {
                return self.lock_and_spawn(&active);
            }
            active = down;
        }
    }

    fn lock_and_spawn(&self, active: &ActivePiece) -> Result<Self, EngineError> {
        let outcome = lock_piece(&self.grid, active, self.score, self.lines, self.level)?;
        let locked = Self {
            grid: Arc::new(outcome.grid),
            active: None,
            score: outcome.score,
            lines: outcome.lines,
            level: outcome.level,
            last_lock: Some(outcome.event),
            pieces_locked: self.pieces_locked.wrapping_add(1),
            ..self.clone()
        };
        Ok(locked.spawn())
    }

    /// Rotate clockwise with the sideways kick; unchanged if blocked
    pub fn rotate(&self) -> Self {
        if !self.is_playable() {
            return self.clone();
        }
        match self.active {
            Some(active) => Self {
                active: Some(attempt_rotate(&active, &self.grid)),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Swap the active piece with the held piece (once per spawned piece)
    pub fn hold(&self) -> Self {
        crate::hold::hold(self)
    }

    /// Flip the pause flag; no effect once the game is over
    pub fn toggle_pause(&self) -> Self {
        if self.game_over {
            return self.clone();
        }
        Self {
            paused: !self.paused,
            ..self.clone()
        }
        .spawn()
    }

    /// A fresh game, continuing the piece generator
    pub fn reset(&self) -> Self {
        Self::fresh(self.config, self.rng)
    }

    /// Apply an action, surfacing invariant failures
    pub fn try_apply(&self, action: GameAction) -> Result<Self, EngineError> {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::HardDrop => self.try_hard_drop(),
            GameAction::Rotate => Ok(self.rotate()),
            GameAction::Hold => Ok(self.hold()),
            GameAction::TogglePause => Ok(self.toggle_pause()),
            GameAction::Reset => Ok(self.reset()),
        }
    }

    /// Apply an action
    ///
    /// An invariant failure rejects the whole action: the prior state is
    /// returned and the failure is reported on stderr.
    pub fn apply(&self, action: GameAction) -> Self {
        match self.try_apply(action) {
            Ok(next) => next,
            Err(e) => {
                report_rejection(action, &e);
                self.clone()
            }
        }
    }

    /// Owned read-only copy for consumers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            grid: self.grid.to_rows(),
            active: self.active.map(ActiveSnapshot::from),
            held: self.held.map(|t| t.kind),
            next: self.next.kind,
            can_hold: self.can_hold,
            score: self.score,
            lines: self.lines,
            level: self.level,
            game_over: self.game_over,
            paused: self.paused,
            phase: self.phase(),
            descent_interval_ms: self.descent_interval_ms(),
            last_lock: self.last_lock,
            pieces_locked: self.pieces_locked,
        }
    }
}

/// Invariant failures are defects: loud in debug builds, logged in release.
fn report_rejection(action: GameAction, error: &EngineError) {
    eprintln!("[Engine] {} rejected: {}", action.as_str(), error);
    debug_assert!(false, "[Engine] {} rejected: {}", action.as_str(), error);
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(state: &GameState, actions: &[GameAction]) -> GameState {
        actions.iter().fold(state.clone(), |s, &a| s.apply(a))
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert!(state.held.is_none());
        assert!(state.can_hold);
        assert!(state.active.is_some());
        assert_eq!(state.phase(), Phase::Active);
        assert_eq!(state.grid.occupied_count(), 0);
    }

    #[test]
    fn test_spawn_position_is_centered() {
        assert_eq!(spawn_position(&Tetromino::new(PieceKind::O), 10), Position::new(4, 0));
        assert_eq!(spawn_position(&Tetromino::new(PieceKind::I), 10), Position::new(3, 0));
        assert_eq!(spawn_position(&Tetromino::new(PieceKind::T), 10), Position::new(4, 0));
    }

    #[test]
    fn test_spawn_consumes_next_and_draws_new_one() {
        let state = GameState::new(7);
        let upcoming = state.next.kind;

        let locked = state.try_hard_drop().unwrap();
        assert_eq!(locked.active.unwrap().tetromino.kind, upcoming);
        assert!(locked.can_hold);
    }

    #[test]
    fn test_horizontal_block_is_rejected_without_lock() {
        let state = GameState::from_parts(EngineConfig::default(), Grid::new(20, 10), PieceKind::O, 3)
            .unwrap();
        let mut s = state.clone();
        for _ in 0..10 {
            s = s.apply(GameAction::MoveLeft);
        }
        assert_eq!(s.active.unwrap().position, Position::new(0, 0));
        assert_eq!(s.grid.occupied_count(), 0);
    }

    #[test]
    fn test_upward_move_into_space_above_grid() {
        // y < 0 never collides, so moving up from the spawn row is allowed.
        let state = GameState::new(5);
        let up = state.try_move(0, -1).unwrap();
        assert_eq!(up.active.unwrap().position.y, -1);
        assert_eq!(up.grid.occupied_count(), 0);
    }

    #[test]
    fn test_soft_drop_locks_at_floor() {
        let state = GameState::from_parts(EngineConfig::default(), Grid::new(20, 10), PieceKind::O, 3)
            .unwrap();
        let mut s = state;
        for _ in 0..18 {
            s = s.apply(GameAction::SoftDrop);
        }
        assert_eq!(s.active.unwrap().position.y, 18);
        assert_eq!(s.grid.occupied_count(), 0);

        let s = s.apply(GameAction::SoftDrop);
        assert_eq!(s.grid.occupied_count(), 4);
        assert_eq!(s.last_lock.unwrap().kind, PieceKind::O);
        assert_eq!(s.active.unwrap().position.y, 0);
    }

    #[test]
    fn test_paused_game_ignores_moves() {
        let state = GameState::new(11).apply(GameAction::TogglePause);
        assert_eq!(state.phase(), Phase::Paused);
        assert_eq!(state.descent_interval_ms(), None);

        let after = apply_all(
            &state,
            &[
                GameAction::MoveLeft,
                GameAction::SoftDrop,
                GameAction::HardDrop,
                GameAction::Rotate,
                GameAction::Hold,
            ],
        );
        assert_eq!(after, state);

        let resumed = after.apply(GameAction::TogglePause);
        assert_eq!(resumed.phase(), Phase::Active);
        assert_eq!(resumed.descent_interval_ms(), Some(800.0));
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut grid = Grid::new(20, 10);
        grid.set(4, 0, Some(PieceKind::Z));
        let state = GameState::from_parts(EngineConfig::default(), grid, PieceKind::O, 1).unwrap();
        assert!(state.game_over);
        assert!(state.active.is_none());
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.descent_interval(), None);
    }

    #[test]
    fn test_game_over_ignores_everything_but_reset() {
        let mut grid = Grid::new(20, 10);
        grid.set(4, 0, Some(PieceKind::Z));
        let over = GameState::from_parts(EngineConfig::default(), grid, PieceKind::O, 1).unwrap();

        for action in GameAction::ALL {
            if action == GameAction::Reset {
                continue;
            }
            assert_eq!(over.apply(action), over, "{:?}", action);
        }

        let reset = over.apply(GameAction::Reset);
        assert!(!reset.game_over);
        assert_eq!(reset.grid.occupied_count(), 0);
    }

    #[test]
    fn test_from_parts_rejects_mismatched_grid() {
        let result = GameState::from_parts(EngineConfig::default(), Grid::new(10, 10), PieceKind::T, 1);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_with_config_validates() {
        let config = EngineConfig {
            rows: 2,
            ..EngineConfig::default()
        };
        assert!(GameState::with_config(config, 1).is_err());
    }

    #[test]
    fn test_transitions_leave_source_untouched() {
        let state = GameState::new(99);
        let before = state.clone();
        let _ = state.apply(GameAction::HardDrop);
        let _ = state.apply(GameAction::Hold);
        assert_eq!(state, before);
    }

    #[test]
    fn test_slowest_config_interval_fits_duration() {
        let config = EngineConfig {
            initial_speed_ms: crate::config::MAX_SPEED_MS,
            min_speed_ms: crate::config::MAX_SPEED_MS,
            ..EngineConfig::default()
        };
        let state = GameState::with_config(config, 1).unwrap();
        assert_eq!(state.descent_interval(), Some(Duration::from_secs(60)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "softDrop rejected")]
    fn test_invariant_failure_asserts_in_debug() {
        report_rejection(
            GameAction::SoftDrop,
            &EngineError::ClearedRowsOutOfRange { count: 5 },
        );
    }
}
