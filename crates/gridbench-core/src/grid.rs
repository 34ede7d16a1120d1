//! Rectangular grid container.

use std::ops::Index;

use crate::{Dimensions, GridError, Position};

/// A fixed-size, row-major grid of cell values.
///
/// Every grid remembers a *default* cell value: the value an untouched cell
/// holds. Puzzle code uses it to tell "given" cells (anything but the
/// default) from empty ones.
///
/// Cloning a grid produces an independent deep copy, so a grid handed out
/// for comparison or undo stays valid no matter what happens to the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    dims: Dimensions,
    cells: Vec<T>,
    default: T,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`, which also becomes the
    /// grid's default value.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if `rows` or `cols` is zero
    /// or the cell count overflows.
    pub fn new(rows: usize, cols: usize, fill: T) -> Result<Self, GridError> {
        let dims = Dimensions::new(rows, cols);
        let area = dims
            .checked_area()
            .filter(|&area| area > 0)
            .ok_or(GridError::InvalidDimension { rows, cols })?;
        Ok(Self {
            dims,
            cells: vec![fill.clone(); area],
            default: fill,
        })
    }

    /// Creates a grid from a literal 2-D array.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if there are no rows or the
    /// rows are empty, and [`GridError::RaggedRows`] if the rows differ in
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridbench_core::{Grid, Position};
    ///
    /// let grid = Grid::from_rows(&[[1, 0], [0, 2]], 0)?;
    /// assert_eq!(grid.rows(), 2);
    /// assert_eq!(grid[Position::new(1, 1)], 2);
    /// # Ok::<(), gridbench_core::GridError>(())
    /// ```
    pub fn from_rows<R>(rows: &[R], default: T) -> Result<Self, GridError>
    where
        R: AsRef<[T]>,
    {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let dims = Dimensions::new(rows.len(), cols);
        let area = dims
            .checked_area()
            .filter(|&area| area > 0)
            .ok_or(GridError::InvalidDimension {
                rows: rows.len(),
                cols,
            })?;

        let mut cells = Vec::with_capacity(area);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::RaggedRows {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            dims,
            cells,
            default,
        })
    }

    /// Creates a grid from a fixed-size 2-D array.
    ///
    /// Unlike [`Grid::from_rows`] this cannot fail: empty extents are
    /// rejected at compile time.
    #[must_use]
    pub fn from_array<const R: usize, const C: usize>(rows: [[T; C]; R], default: T) -> Self {
        const { assert!(R > 0 && C > 0, "grid extents must be non-zero") };
        Self {
            dims: Dimensions::new(R, C),
            cells: rows.into_iter().flatten().collect(),
            default,
        }
    }

    /// Returns a copy of this grid with the cell at `pos` replaced.
    ///
    /// `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn with_cell(&self, pos: Position, value: T) -> Result<Self, GridError> {
        let index = self.index_checked(pos)?;
        let mut next = self.clone();
        next.cells[index] = value;
        Ok(next)
    }

    /// Returns a grid of the same extents with every cell reset to the
    /// default value.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            dims: self.dims,
            cells: vec![self.default.clone(); self.dims.area()],
            default: self.default.clone(),
        }
    }

    /// Builds a new grid by mapping every cell.
    #[must_use]
    pub fn map<U, F>(&self, default: U, mut f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            dims: self.dims,
            cells: self.cells.iter().map(&mut f).collect(),
            default,
        }
    }
}

impl<T> Grid<T> {
    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.dims.rows()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.dims.cols()
    }

    /// Returns the grid extents.
    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Returns the value untouched cells hold.
    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Returns the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn get(&self, pos: Position) -> Result<&T, GridError> {
        let index = self.index_checked(pos)?;
        Ok(&self.cells[index])
    }

    /// Replaces the cell at `pos` in place, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid; the
    /// grid is unchanged in that case.
    pub fn set(&mut self, pos: Position, value: T) -> Result<T, GridError> {
        let index = self.index_checked(pos)?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Counts the cells satisfying `predicate`.
    pub fn count_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.cells.iter().filter(|cell| predicate(cell)).count()
    }

    /// Returns the first position, in row-major order, whose cell satisfies
    /// `predicate`.
    pub fn position_where<F>(&self, mut predicate: F) -> Option<Position>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .find_map(|(pos, cell)| predicate(cell).then_some(pos))
    }

    /// Iterates over `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.dims.positions().zip(&self.cells)
    }

    /// Iterates over the rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.dims.cols())
    }

    /// Checks that `other` has the same extents as `self`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the extents differ.
    pub fn ensure_same_dims<U>(&self, other: &Grid<U>) -> Result<(), GridError> {
        if self.dims == other.dims {
            Ok(())
        } else {
            Err(GridError::DimensionMismatch {
                expected: self.dims,
                actual: other.dims,
            })
        }
    }

    fn index_checked(&self, pos: Position) -> Result<usize, GridError> {
        if self.dims.contains(pos) {
            Ok(self.dims.index_of(pos))
        } else {
            Err(GridError::OutOfBounds {
                pos,
                dims: self.dims,
            })
        }
    }
}

impl<T: PartialEq> Grid<T> {
    /// Returns `true` if the cell at `pos` differs from the default value.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn is_set(&self, pos: Position) -> Result<bool, GridError> {
        Ok(*self.get(pos)? != self.default)
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `pos` is outside the grid. Use [`Grid::get`] for a checked
    /// lookup.
    fn index(&self, pos: Position) -> &Self::Output {
        assert!(
            self.dims.contains(pos),
            "position {pos} is outside a {} grid",
            self.dims
        );
        &self.cells[self.dims.index_of(pos)]
    }
}
