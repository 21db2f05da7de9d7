use std::fmt;

use crate::collision::{ActivePiece, Position};
use crate::game_state::Phase;
use crate::lock::LockEvent;
use crate::pieces::Shape;
use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub position: Position,
    pub color: &'static str,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.tetromino.kind,
            shape: value.tetromino.shape,
            position: value.position,
            color: value.tetromino.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub held: Option<PieceKind>,
    pub next: PieceKind,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub paused: bool,
    pub phase: Phase,
    pub descent_interval_ms: Option<f64>,
    pub last_lock: Option<LockEvent>,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Grid rows with the active piece drawn in; off-grid cells are skipped
    pub fn composite_rows(&self) -> Vec<Vec<Cell>> {
        let mut rows = self.grid.clone();
        if let Some(active) = self.active {
            for (dx, dy) in active.shape.filled_cells() {
                let x = active.position.x + dx;
                let y = active.position.y + dy;
                if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
                    continue;
                }
                rows[y as usize][x as usize] = Some(active.kind);
            }
        }
        rows
    }
}

impl fmt::Display for GameSnapshot {
    /// Plain-text view: composite grid, then one status line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.composite_rows() {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Some(kind) => kind.as_str().chars().next().unwrap_or('#'),
                    None => '.',
                })
                .collect();
            writeln!(f, "|{}|", line)?;
        }
        write!(
            f,
            "score={} lines={} level={} next={} hold={} phase={}",
            self.score,
            self.lines,
            self.level,
            self.next.as_str(),
            self.held.map(|k| k.as_str()).unwrap_or("-"),
            self.phase.as_str()
        )
    }
}
