//! Piece catalog and rotation tests

use blockfall::core::{
    attempt_rotate, canonical_shape, rotate, try_rotate, ActivePiece, EngineError, Grid, Position,
    Shape, Tetromino,
};
use blockfall::types::PieceKind;

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shape() {
    let shape = canonical_shape(PieceKind::I);
    assert_eq!(shape.size(), 4);
    assert_eq!(shape.filled_cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);
}

#[test]
fn test_o_piece_shape() {
    let shape = canonical_shape(PieceKind::O);
    assert_eq!(shape.size(), 2);
    assert_eq!(shape.filled_cells().as_slice(), &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    // Rotation leaves the square unchanged.
    assert_eq!(rotate(&shape), shape);
}

#[test]
fn test_t_piece_shape_and_rotations() {
    let north = canonical_shape(PieceKind::T);
    assert_eq!(north.filled_cells().as_slice(), &[(1, 0), (0, 1), (1, 1), (2, 1)]);

    let east = rotate(&north);
    assert_eq!(east.filled_cells().as_slice(), &[(1, 0), (1, 1), (2, 1), (1, 2)]);

    let south = rotate(&east);
    assert_eq!(south.filled_cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (1, 2)]);

    let west = rotate(&south);
    assert_eq!(west.filled_cells().as_slice(), &[(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_three_wide_pieces() {
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        assert_eq!(canonical_shape(kind).size(), 3, "{:?}", kind);
    }
}

#[test]
fn test_every_shape_has_four_cells_in_every_orientation() {
    for kind in PieceKind::ALL {
        let mut shape = canonical_shape(kind);
        for _ in 0..4 {
            assert_eq!(shape.filled_cells().len(), 4, "{:?}", kind);
            shape = rotate(&shape);
        }
        assert_eq!(shape, canonical_shape(kind));
    }
}

#[test]
fn test_from_rows_validates_shape() {
    let square = Shape::from_rows(&[[true, true], [true, true]]).unwrap();
    assert_eq!(square, canonical_shape(PieceKind::O));

    let ragged: Vec<Vec<bool>> = vec![vec![true, true, true], vec![true, true]];
    assert!(matches!(
        Shape::from_rows(&ragged),
        Err(EngineError::NonSquareShape { .. })
    ));

    let big = vec![vec![false; 5]; 5];
    assert!(matches!(
        Shape::from_rows(&big),
        Err(EngineError::ShapeTooLarge { .. })
    ));
}

#[test]
fn test_piece_colors() {
    assert_eq!(Tetromino::new(PieceKind::I).color(), "cyan");
    assert_eq!(Tetromino::new(PieceKind::O).color(), "yellow");
    assert_eq!(Tetromino::new(PieceKind::T).color(), "purple");
}

// ============== Rotation Tests ==============

#[test]
fn test_rotate_in_open_space_keeps_position() {
    let grid = Grid::new(20, 10);
    let piece = ActivePiece::new(Tetromino::new(PieceKind::L), Position::new(4, 5));
    let rotated = try_rotate(&piece, &grid).unwrap();
    assert_eq!(rotated.position, piece.position);
    assert_eq!(rotated.tetromino.shape, rotate(&piece.tetromino.shape));
}

#[test]
fn test_vertical_i_flush_left_kicks_right() {
    let grid = Grid::new(20, 10);
    // Counter-clockwise of canonical is three clockwise turns: filled column 1.
    let vertical = Tetromino::new(PieceKind::I).rotated_cw().rotated_cw().rotated_cw();
    let piece = ActivePiece::new(vertical, Position::new(-1, 5));
    assert!(!piece.collides(&grid));

    // Rotating back to horizontal needs columns -1..=2; the +1 kick fits.
    let rotated = try_rotate(&piece, &grid).unwrap();
    assert_eq!(rotated.position, Position::new(0, 5));
}

#[test]
fn test_i_rotation_retained_when_no_kick_fits() {
    let grid = Grid::new(20, 10);
    // One clockwise turn fills local column 2; at x = -2 it sits in grid column 0.
    let vertical = Tetromino::new(PieceKind::I).rotated_cw();
    let piece = ActivePiece::new(vertical, Position::new(-2, 4));
    assert!(!piece.collides(&grid));

    // Horizontal needs x >= 0, two columns beyond the reach of a one-column kick.
    assert!(try_rotate(&piece, &grid).is_none());
    assert_eq!(attempt_rotate(&piece, &grid), piece);
}

#[test]
fn test_rotation_blocked_by_stack_is_retained() {
    let mut grid = Grid::new(20, 10);
    let piece = ActivePiece::new(Tetromino::new(PieceKind::T), Position::new(4, 10));
    // The clockwise T needs local (1, 2), grid (5, 12), for every kick: block all three.
    for x in 4..=6 {
        grid.set(x, 12, Some(PieceKind::O));
    }
    assert!(!piece.collides(&grid));
    assert_eq!(attempt_rotate(&piece, &grid), piece);
}
