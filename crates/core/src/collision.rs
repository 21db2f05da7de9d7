//! Collision detection between a shape and the grid

use crate::board::Grid;
use crate::pieces::{Shape, Tetromino};

/// Top-left offset of a shape within the grid; `y` may be negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The falling, player-controlled piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub tetromino: Tetromino,
    pub position: Position,
}

impl ActivePiece {
    pub fn new(tetromino: Tetromino, position: Position) -> Self {
        Self {
            tetromino,
            position,
        }
    }

    /// Whether the piece overlaps a wall, the floor or a locked cell
    pub fn collides(&self, grid: &Grid) -> bool {
        check_collision(self.position, &self.tetromino.shape, grid)
    }

    /// Same piece shifted by (dx, dy); no collision check
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }

    /// Absolute grid coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let Position { x, y } = self.position;
        self.tetromino
            .shape
            .filled_cells()
            .into_iter()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Whether placing `shape` at `position` collides
///
/// A filled cell collides when it lies left of column 0, right of the last
/// column, below the last row, or on an occupied cell. Cells above the top
/// edge never collide.
pub fn check_collision(position: Position, shape: &Shape, grid: &Grid) -> bool {
    let cols = grid.cols() as i32;
    let rows = grid.rows() as i32;
    shape.filled_cells().iter().any(|&(dx, dy)| {
        let x = position.x + dx;
        let y = position.y + dy;
        x < 0 || x >= cols || y >= rows || (y >= 0 && grid.is_cell_occupied(x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{canonical_shape, Tetromino};
    use crate::types::PieceKind;

    #[test]
    fn test_walls_and_floor() {
        let grid = Grid::new(20, 10);
        let o = canonical_shape(PieceKind::O);
        assert!(!check_collision(Position::new(0, 0), &o, &grid));
        assert!(!check_collision(Position::new(8, 18), &o, &grid));
        assert!(check_collision(Position::new(-1, 0), &o, &grid));
        assert!(check_collision(Position::new(9, 0), &o, &grid));
        assert!(check_collision(Position::new(0, 19), &o, &grid));
    }

    #[test]
    fn test_empty_padding_may_hang_past_walls() {
        let grid = Grid::new(20, 10);
        // I canonical fills only row 1; rows 0, 2 and 3 are padding.
        let i = canonical_shape(PieceKind::I);
        assert!(!check_collision(Position::new(0, 18), &i, &grid));
        assert!(check_collision(Position::new(0, 19), &i, &grid));
    }

    #[test]
    fn test_above_top_never_collides() {
        let mut grid = Grid::new(20, 10);
        for x in 0..10 {
            grid.set(x, 0, Some(PieceKind::Z));
        }
        let o = canonical_shape(PieceKind::O);
        assert!(!check_collision(Position::new(4, -2), &o, &grid));
        assert!(check_collision(Position::new(4, -1), &o, &grid));
    }

    #[test]
    fn test_active_piece_cells_are_absolute() {
        let piece = ActivePiece::new(Tetromino::new(PieceKind::O), Position::new(4, 0));
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 0), (5, 0), (4, 1), (5, 1)]);
        assert_eq!(piece.shifted(1, 2).position, Position::new(5, 2));
    }

    #[test]
    fn test_occupied_cell() {
        let mut grid = Grid::new(20, 10);
        grid.set(5, 10, Some(PieceKind::S));
        let o = canonical_shape(PieceKind::O);
        assert!(check_collision(Position::new(4, 9), &o, &grid));
        assert!(!check_collision(Position::new(6, 9), &o, &grid));
    }
}
