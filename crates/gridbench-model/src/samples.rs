//! Demo puzzles and stand-in payloads for each domain.
//!
//! The payloads are opaque: they are shown as the model's answer without
//! checking them against the puzzle rules. The constraint payload in
//! particular repeats digits within rows and differs from some clues; the
//! reveal keeps the clues regardless.

use gridbench_core::Grid;
use gridbench_puzzle::MazeCell;

use crate::Precomputed;

/// Side length of the sample maze.
pub const MAZE_SIZE: usize = 20;

const CONSTRAINT_PUZZLE: [[u8; 9]; 9] = [
    [0, 0, 0, 6, 0, 0, 4, 0, 0],
    [7, 0, 0, 0, 0, 3, 6, 0, 0],
    [0, 0, 0, 0, 9, 1, 0, 8, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 5, 0, 1, 8, 0, 0, 0, 3],
    [0, 0, 0, 3, 0, 6, 0, 4, 5],
    [0, 4, 0, 2, 0, 0, 0, 6, 0],
    [9, 0, 3, 0, 0, 0, 0, 0, 0],
    [0, 2, 0, 0, 0, 0, 1, 0, 0],
];

const CONSTRAINT_PAYLOAD: [[u8; 9]; 9] = [
    [2, 6, 1, 6, 3, 7, 4, 9, 5],
    [7, 8, 9, 4, 2, 3, 6, 1, 2],
    [3, 4, 5, 8, 9, 1, 7, 8, 6],
    [1, 9, 7, 5, 4, 2, 8, 3, 6],
    [6, 5, 2, 1, 8, 9, 9, 7, 3],
    [8, 3, 4, 3, 7, 6, 2, 4, 5],
    [5, 4, 8, 2, 1, 3, 3, 6, 7],
    [9, 1, 3, 7, 6, 4, 5, 2, 8],
    [4, 2, 6, 9, 5, 8, 1, 3, 9],
];

const TRANSFORM_PUZZLE: [[u8; 10]; 10] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 3, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 3, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 3],
];

const TRANSFORM_PAYLOAD: [[u8; 10]; 10] = [
    [1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 3, 3, 3],
    [0, 0, 0, 0, 0, 0, 0, 3, 3, 3],
    [0, 0, 0, 0, 0, 0, 0, 3, 3, 3],
];

/// Returns the 9x9 constraint sample.
#[must_use]
pub fn constraint_puzzle() -> Grid<u8> {
    Grid::from_array(CONSTRAINT_PUZZLE, 0)
}

/// Returns the stand-in answer for any 9x9 constraint grid.
#[must_use]
pub fn constraint_model() -> Precomputed<u8> {
    Precomputed::new(
        "precomputed constraint payload",
        Grid::from_array(CONSTRAINT_PAYLOAD, 0),
    )
}

/// Returns the 10x10 transform sample: three diagonals and a square.
#[must_use]
pub fn transform_puzzle() -> Grid<u8> {
    Grid::from_array(TRANSFORM_PUZZLE, 0)
}

/// Returns the stand-in answer for any 10x10 transform grid.
#[must_use]
pub fn transform_model() -> Precomputed<u8> {
    Precomputed::new(
        "precomputed transform payload",
        Grid::from_array(TRANSFORM_PAYLOAD, 0),
    )
}

/// Returns the 20x20 sample maze.
///
/// The border is walled, interior walls sit on every third row and every
/// second column starting at `(2, 2)`, the start is at `(1, 1)` and the
/// goal at `(18, 18)`.
#[must_use]
pub fn maze_puzzle() -> Grid<MazeCell> {
    let last = MAZE_SIZE - 1;
    let mut rows = [[MazeCell::Open; MAZE_SIZE]; MAZE_SIZE];

    for (r, row) in rows.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            let border = r == 0 || r == last || c == 0 || c == last;
            let interior = (2..last - 1).contains(&r)
                && (2..last - 1).contains(&c)
                && (r - 2) % 3 == 0
                && (c - 2) % 2 == 0;
            if border || interior {
                *cell = MazeCell::Wall;
            }
        }
    }
    rows[1][1] = MazeCell::Start;
    rows[last - 1][last - 1] = MazeCell::Goal;

    Grid::from_array(rows, MazeCell::Open)
}
