use crate::{Dimensions, Position};

/// Errors raised by grid construction and coordinate access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// A grid was requested with zero rows or zero columns, or with more
    /// cells than `usize` can count.
    #[display("invalid grid dimensions: {rows}x{cols}")]
    InvalidDimension {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// A coordinate lies outside the grid.
    #[display("position {pos} is outside a {dims} grid")]
    OutOfBounds {
        /// The offending position.
        pos: Position,
        /// Extents of the grid that was accessed.
        dims: Dimensions,
    },
    /// A literal grid had rows of differing length.
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRows {
        /// Zero-based index of the first mismatching row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the mismatching row.
        actual: usize,
    },
    /// Two grids that must share extents do not.
    #[display("grid dimensions differ: expected {expected}, found {actual}")]
    DimensionMismatch {
        /// Extents of the reference grid.
        expected: Dimensions,
        /// Extents of the grid being compared.
        actual: Dimensions,
    },
}
