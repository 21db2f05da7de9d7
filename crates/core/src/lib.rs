//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the whole falling-block rule set: the piece catalog,
//! the grid, collision detection, rotation, locking and line clears, hold,
//! scoring and the session state machine. It has **no** dependencies on
//! rendering, input devices, networking or I/O, which makes it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Pure**: every transition returns a new [`GameState`] value
//! - **Portable**: any driver can sit on top (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`pieces`]: piece catalog and square shape matrices
//! - [`board`]: fixed-size grid with merge and full-row clearing
//! - [`collision`]: positions, the active piece, and the collision check
//! - [`rotation`]: clockwise rotation with a one-column wall kick
//! - [`lock`]: lock & clear pipeline
//! - [`hold`]: once-per-piece hold swap
//! - [`scoring`]: line clear points, level and descent pacing
//! - [`game_state`]: the session state machine and action API
//! - [`snapshot`]: owned read-only view for renderers and collaborators
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let game = GameState::new(12345);
//! let game = game
//!     .apply(GameAction::MoveRight)
//!     .apply(GameAction::Rotate)
//!     .apply(GameAction::HardDrop);
//!
//! assert_eq!(game.last_lock().map(|e| e.lines_cleared), Some(0));
//! assert_eq!(game.descent_interval_ms(), Some(800.0));
//! ```
//!
//! # Timing
//!
//! The engine has no clock. A driver calls `SoftDrop` every
//! [`GameState::descent_interval`] and re-arms its timer after every state
//! change; the interval is `None` while paused or over.

pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod game_state;
pub mod hold;
pub mod lock;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Grid;
pub use collision::{check_collision, ActivePiece, Position};
pub use config::{EngineConfig, MAX_DIMENSION, MAX_SPEED_MS};
pub use error::EngineError;
pub use game_state::{spawn_position, GameState, Phase};
pub use lock::{lock_piece, LockEvent, LockOutcome};
pub use pieces::{canonical_shape, random_tetromino, Shape, Tetromino};
pub use rng::SimpleRng;
pub use rotation::{attempt_rotate, rotate, try_rotate};
pub use scoring::{descent_interval_ms, level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
