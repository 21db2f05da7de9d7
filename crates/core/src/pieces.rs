//! Pieces module - the piece catalog and square shape matrices
//!
//! Every shape is a square matrix so that a clockwise rotation (transpose,
//! then reverse the rows) is always well-defined. Shapes are padded to their
//! bounding square: I is 4x4, O is 2x2 and the rest are 3x3.

use arrayvec::ArrayVec;

use crate::error::EngineError;
use crate::rng::SimpleRng;
use crate::types::{PieceKind, MAX_SHAPE_SIZE};

const N: usize = MAX_SHAPE_SIZE;

/// Offset of a single filled cell relative to the shape's top-left corner, as (x, y)
pub type CellOffset = (i32, i32);

/// One orientation of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    /// Row-major; only the top-left `size x size` block is meaningful.
    cells: [[bool; N]; N],
}

impl Shape {
    /// Build a catalog shape from a 0/1 pattern; entries outside `size` are ignored
    const fn from_pattern(size: usize, pattern: [[u8; N]; N]) -> Self {
        let mut cells = [[false; N]; N];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                cells[y][x] = pattern[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self { size, cells }
    }

    /// Build a shape from arbitrary row data
    ///
    /// Fails if the rows do not form a square matrix or exceed the catalog
    /// maximum.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, EngineError> {
        let size = rows.len();
        if size > N {
            return Err(EngineError::ShapeTooLarge { size, max: N });
        }
        let mut cells = [[false; N]; N];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(EngineError::NonSquareShape {
                    rows: size,
                    cols: row.len(),
                });
            }
            cells[y][..size].copy_from_slice(row);
        }
        Ok(Self { size, cells })
    }

    /// Side length of the square matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the local cell (x, y) is filled; out-of-range reads are empty
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.cells[y][x]
    }

    /// Offsets of every filled cell, in row-major order
    pub fn filled_cells(&self) -> ArrayVec<CellOffset, { N * N }> {
        let mut out = ArrayVec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                if self.cells[y][x] {
                    out.push((x as i32, y as i32));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise (transpose, then reverse each row)
    pub fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut cells = [[false; N]; N];
        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - x][y];
            }
        }
        Self { size: n, cells }
    }

    /// Rows as boolean vectors (for display and tests)
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.size)
            .map(|y| self.cells[y][..self.size].to_vec())
            .collect()
    }
}

const I_SHAPE: Shape = Shape::from_pattern(
    4,
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const J_SHAPE: Shape = Shape::from_pattern(
    3,
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const L_SHAPE: Shape = Shape::from_pattern(
    3,
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const O_SHAPE: Shape = Shape::from_pattern(
    2,
    [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const S_SHAPE: Shape = Shape::from_pattern(
    3,
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const T_SHAPE: Shape = Shape::from_pattern(
    3,
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const Z_SHAPE: Shape = Shape::from_pattern(
    3,
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

/// Canonical (spawn) orientation of a piece kind
pub fn canonical_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// A piece value: its kind plus one orientation
///
/// Immutable; rotating yields a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl Tetromino {
    /// A piece of the given kind in its canonical orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: canonical_shape(kind),
        }
    }

    /// Color tag written into grid cells when this piece locks
    pub fn color(&self) -> &'static str {
        self.kind.color()
    }

    /// The same piece with its shape rotated clockwise
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// The same piece back in canonical orientation
    pub fn canonical(&self) -> Self {
        Self::new(self.kind)
    }
}

/// Pick a piece uniformly at random from the catalog (with replacement)
pub fn random_tetromino(rng: &mut SimpleRng) -> Tetromino {
    let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    Tetromino::new(PieceKind::ALL[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes_are_square_and_have_four_cells() {
        for kind in PieceKind::ALL {
            let shape = canonical_shape(kind);
            assert_eq!(shape.to_rows().len(), shape.size());
            assert_eq!(shape.filled_cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(canonical_shape(PieceKind::I).size(), 4);
        assert_eq!(canonical_shape(PieceKind::O).size(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(canonical_shape(kind).size(), 3);
        }
    }

    #[test]
    fn test_t_rotates_clockwise() {
        let east = canonical_shape(PieceKind::T).rotated_cw();
        assert_eq!(
            east.to_rows(),
            vec![
                vec![false, true, false],
                vec![false, true, true],
                vec![false, true, false],
            ]
        );
    }

    #[test]
    fn test_i_rotates_to_vertical_column_two() {
        let vertical = canonical_shape(PieceKind::I).rotated_cw();
        assert_eq!(vertical.filled_cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        let rows = [vec![true, true, true], vec![true, true, true]];
        assert_eq!(
            Shape::from_rows(&rows),
            Err(EngineError::NonSquareShape { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_from_rows_rejects_oversized() {
        let rows = vec![vec![false; 5]; 5];
        assert!(matches!(
            Shape::from_rows(&rows),
            Err(EngineError::ShapeTooLarge { size: 5, .. })
        ));
    }

    #[test]
    fn test_from_rows_matches_catalog() {
        let o = Shape::from_rows(&[[true, true], [true, true]]).unwrap();
        assert_eq!(o, canonical_shape(PieceKind::O));
    }

    #[test]
    fn test_random_tetromino_is_canonical_and_deterministic() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..20 {
            let pa = random_tetromino(&mut a);
            assert_eq!(pa, random_tetromino(&mut b));
            assert_eq!(pa.shape, canonical_shape(pa.kind));
        }
    }

    #[test]
    fn test_canonical_discards_rotation() {
        let piece = Tetromino::new(PieceKind::L).rotated_cw().rotated_cw();
        assert_ne!(piece.shape, canonical_shape(PieceKind::L));
        assert_eq!(piece.canonical(), Tetromino::new(PieceKind::L));
    }
}
