//! Shared types - plain data used by the engine, the driver and consumers
//!
//! Everything here is dependency-free so it can be used by the core engine,
//! the asynchronous driver and any renderer sitting on top of them.
//!
//! # Playfield Dimensions
//!
//! The default grid is 10 columns by 20 rows. Both values are only defaults:
//! the engine reads its dimensions from its configuration.
//!
//! # Pacing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 800 | Descent interval at level 1 |
//! | `MIN_SPEED_MS` | 100 | Descent interval floor |
//! | `SPEED_DECAY` | 0.9 | Per-level multiplier |
//!
//! The descent interval is `max(MIN, INITIAL * DECAY^(level - 1))`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert_eq!(DEFAULT_COLS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

/// Default grid width in cells
pub const DEFAULT_COLS: usize = 10;

/// Default grid height in cells
pub const DEFAULT_ROWS: usize = 20;

/// Descent interval at level 1, in milliseconds
pub const INITIAL_SPEED_MS: f64 = 800.0;

/// Lower bound of the descent interval, in milliseconds
pub const MIN_SPEED_MS: f64 = 100.0;

/// Multiplier applied to the descent interval for every level above 1
pub const SPEED_DECAY: f64 = 0.9;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Side length of the largest catalog shape (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Line clear scoring table, indexed by the number of rows cleared at once
///
/// Points are multiplied by the level that was current when the piece locked.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Color tag carried by cells this piece locks into the grid
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "cyan",
            PieceKind::J => "blue",
            PieceKind::L => "orange",
            PieceKind::O => "yellow",
            PieceKind::S => "green",
            PieceKind::T => "purple",
            PieceKind::Z => "red",
        }
    }
}

/// Discrete commands accepted by the game session
///
/// Horizontal moves and soft drop are unit moves. `HardDrop` repeats the
/// downward move until the piece locks and awards no extra points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if blocked
    SoftDrop,
    /// Drop piece until it locks
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Swap the active piece with the held piece
    Hold,
    /// Toggle pause state
    TogglePause,
    /// Return to a fresh game
    Reset,
}

impl GameAction {
    /// Every action, in declaration order
    pub const ALL: [GameAction; 8] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
        GameAction::Hold,
        GameAction::TogglePause,
        GameAction::Reset,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("togglepause"), Some(GameAction::TogglePause));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::TogglePause => "togglePause",
            GameAction::Reset => "reset",
        }
    }
}

/// A cell on the grid
///
/// - `None`: empty
/// - `Some(PieceKind)`: occupied by a locked piece of that kind
pub type Cell = Option<PieceKind>;
