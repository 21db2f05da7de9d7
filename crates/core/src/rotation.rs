//! Rotation with a minimal wall kick
//!
//! Rotation is always clockwise. When the rotated shape collides in place,
//! the resolver tries one column left, then one column right. There are no
//! vertical kicks and no per-piece kick tables: this is a deliberately small
//! policy, not the Super Rotation System.

use crate::board::Grid;
use crate::collision::{check_collision, ActivePiece};
use crate::pieces::Shape;

/// Horizontal offsets tried in order when rotating
pub const KICK_OFFSETS: [i32; 3] = [0, -1, 1];

/// Shape rotated 90° clockwise
pub fn rotate(shape: &Shape) -> Shape {
    shape.rotated_cw()
}

/// Try to rotate the piece, kicking sideways if needed
///
/// Returns `Some(rotated)` with the kick applied, or `None` when every
/// candidate offset collides (the caller keeps the original piece).
pub fn try_rotate(active: &ActivePiece, grid: &Grid) -> Option<ActivePiece> {
    let rotated = active.tetromino.rotated_cw();
    KICK_OFFSETS.iter().find_map(|&dx| {
        let position = active.position.offset(dx, 0);
        (!check_collision(position, &rotated.shape, grid)).then_some(ActivePiece {
            tetromino: rotated,
            position,
        })
    })
}

/// Rotate if possible, otherwise return the piece unchanged
pub fn attempt_rotate(active: &ActivePiece, grid: &Grid) -> ActivePiece {
    try_rotate(active, grid).unwrap_or(*active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Position;
    use crate::pieces::{canonical_shape, Tetromino};
    use crate::types::PieceKind;

    fn piece(kind: PieceKind, x: i32, y: i32) -> ActivePiece {
        ActivePiece::new(Tetromino::new(kind), Position::new(x, y))
    }

    #[test]
    fn test_four_rotations_cycle() {
        for kind in PieceKind::ALL {
            let shape = canonical_shape(kind);
            let back = rotate(&rotate(&rotate(&rotate(&shape))));
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_in_open_space_keeps_position() {
        let grid = Grid::new(20, 10);
        let t = piece(PieceKind::T, 4, 5);
        let rotated = attempt_rotate(&t, &grid);
        assert_eq!(rotated.position, t.position);
        assert_eq!(rotated.tetromino.shape, rotate(&t.tetromino.shape));
    }

    #[test]
    fn test_kicks_left_first() {
        let grid = Grid::new(20, 10);
        // Vertical I at x=7 fills column 9; rotating back to horizontal from
        // x=7 would span columns 7..=10.
        let vertical = ActivePiece::new(Tetromino::new(PieceKind::I).rotated_cw(), Position::new(7, 0));
        assert!(!vertical.collides(&grid));
        let rotated = attempt_rotate(&vertical, &grid);
        assert_eq!(rotated.position, Position::new(6, 0));
        assert!(!rotated.collides(&grid));
    }

    #[test]
    fn test_kicks_right_when_left_blocked() {
        let grid = Grid::new(20, 10);
        // East-facing T keeps its box's left column empty, so it can sit at
        // x=-1 against the wall. Its next orientation spans all three columns.
        let t_east = ActivePiece::new(Tetromino::new(PieceKind::T).rotated_cw(), Position::new(-1, 5));
        assert!(!t_east.collides(&grid));
        let rotated = attempt_rotate(&t_east, &grid);
        assert_eq!(rotated.position, Position::new(0, 5));
    }

    #[test]
    fn test_rejected_rotation_returns_original() {
        let mut grid = Grid::new(20, 10);
        // Box a T in so no kick works.
        for y in 0..20 {
            for x in 0..10 {
                grid.set(x, y, Some(PieceKind::Z));
            }
        }
        for &(x, y) in &[(5, 10), (4, 11), (5, 11), (6, 11)] {
            grid.set(x, y, None);
        }
        let t = piece(PieceKind::T, 4, 10);
        assert!(!t.collides(&grid));
        assert_eq!(try_rotate(&t, &grid), None);
        assert_eq!(attempt_rotate(&t, &grid), t);
    }
}
