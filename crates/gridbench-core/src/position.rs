//! Grid coordinates and extents.

/// A zero-based `(row, column)` coordinate.
///
/// Positions are not tied to a particular grid; use
/// [`Dimensions::contains`] or the grid accessors to check bounds.
///
/// # Examples
///
/// ```
/// use gridbench_core::Position;
///
/// let pos = Position::new(2, 5);
/// assert_eq!(pos.row(), 2);
/// assert_eq!(pos.col(), 5);
/// assert_eq!(pos.up(), Some(Position::new(1, 5)));
/// assert_eq!(Position::new(0, 0).left(), None);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position from row and column indices.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row index.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column index.
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the position one row up, or `None` on row 0.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        Some(Self::new(self.row.checked_sub(1)?, self.col))
    }

    /// Returns the position one row down.
    ///
    /// The result may lie outside any particular grid.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        Some(Self::new(self.row.checked_add(1)?, self.col))
    }

    /// Returns the position one column left, or `None` on column 0.
    #[must_use]
    pub fn left(self) -> Option<Self> {
        Some(Self::new(self.row, self.col.checked_sub(1)?))
    }

    /// Returns the position one column right.
    ///
    /// The result may lie outside any particular grid.
    #[must_use]
    pub fn right(self) -> Option<Self> {
        Some(Self::new(self.row, self.col.checked_add(1)?))
    }

    /// Returns `true` if `other` shares an edge with `self`.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// The fixed extents of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{rows}x{cols}")]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    /// Creates extents without validating them.
    ///
    /// Grids reject zero extents at construction; see [`Grid::new`].
    ///
    /// [`Grid::new`]: crate::Grid::new
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Returns the number of cells.
    #[must_use]
    pub const fn area(self) -> usize {
        self.rows * self.cols
    }

    /// Returns the number of cells, or `None` if it does not fit in `usize`.
    #[must_use]
    pub const fn checked_area(self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Returns `true` if `pos` lies inside these extents.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Iterates over every position in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridbench_core::{Dimensions, Position};
    ///
    /// let order: Vec<_> = Dimensions::new(2, 2).positions().collect();
    /// assert_eq!(
    ///     order,
    ///     [
    ///         Position::new(0, 0),
    ///         Position::new(0, 1),
    ///         Position::new(1, 0),
    ///         Position::new(1, 1),
    ///     ]
    /// );
    /// ```
    pub fn positions(self) -> impl DoubleEndedIterator<Item = Position> + ExactSizeIterator {
        let cols = self.cols;
        (0..self.area()).map(move |i| Position::new(i / cols, i % cols))
    }

    /// Returns the four edge-adjacent neighbours of `pos` that lie inside
    /// these extents, in up/left/right/down order.
    pub fn neighbors(self, pos: Position) -> impl Iterator<Item = Position> {
        [pos.up(), pos.left(), pos.right(), pos.down()]
            .into_iter()
            .flatten()
            .filter(move |p| self.contains(*p))
    }

    pub(crate) const fn index_of(self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }
}
