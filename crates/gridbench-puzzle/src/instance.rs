use gridbench_core::{Dimensions, Grid, GridError, Position};

use crate::{
    CellEditPolicy, CellWrite, Domain, EditOperation, MazeCell, PathMarkers, PathPolicy,
    PuzzleError,
};

/// An editable puzzle: the working grid plus the grid of given cells.
///
/// The *original* grid holds exactly the clue cells (everything else is the
/// empty value). Clues are what a reveal must never overwrite. Both grids
/// always share extents.
///
/// # Example
///
/// ```
/// use gridbench_core::Position;
/// use gridbench_puzzle::{ConstraintPolicy, EditOperation, PuzzleInstance};
///
/// let mut puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 9, 9)?;
/// let pos = Position::new(0, 3);
///
/// assert_eq!(puzzle.edit(pos, &'6')?, EditOperation::Set);
/// assert_eq!(puzzle.original()[pos], 6);
/// assert!(puzzle.is_given(pos)?);
///
/// // Out-of-range input is ignored.
/// assert_eq!(puzzle.edit(pos, &'x')?, EditOperation::NoOp);
/// # Ok::<(), gridbench_puzzle::PuzzleError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleInstance<P: CellEditPolicy> {
    policy: P,
    working: Grid<P::Cell>,
    original: Grid<P::Cell>,
}

/// A copy of both grids of a [`PuzzleInstance`], used for undo/redo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSnapshot<C> {
    working: Grid<C>,
    original: Grid<C>,
}

impl<C> PuzzleSnapshot<C> {
    /// Returns the working grid at snapshot time.
    #[must_use]
    pub fn working(&self) -> &Grid<C> {
        &self.working
    }
}

/// Cell counts for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleStats {
    /// Total number of cells.
    pub cells: usize,
    /// Cells holding a non-empty value.
    pub filled: usize,
    /// Cells holding the empty value.
    pub empty: usize,
    /// Clue cells.
    pub given: usize,
}

impl<P: CellEditPolicy> PuzzleInstance<P> {
    /// Creates an empty puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] (wrapped) if either extent is
    /// zero.
    pub fn new(policy: P, rows: usize, cols: usize) -> Result<Self, PuzzleError> {
        let working = Grid::new(rows, cols, policy.empty_cell())?;
        let original = working.clone();
        Ok(Self {
            policy,
            working,
            original,
        })
    }

    /// Creates a puzzle from a literal grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid fails the policy's validation.
    pub fn from_grid(policy: P, grid: Grid<P::Cell>) -> Result<Self, PuzzleError> {
        let mut this = Self::new(policy, grid.rows(), grid.cols())?;
        this.load(grid)?;
        Ok(this)
    }

    /// Returns the edit policy.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Returns the domain of this puzzle.
    #[must_use]
    pub fn domain(&self) -> Domain {
        P::DOMAIN
    }

    /// Returns the grid extents.
    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.working.dims()
    }

    /// Returns the grid as currently shown.
    #[must_use]
    pub fn working(&self) -> &Grid<P::Cell> {
        &self.working
    }

    /// Returns the grid of given (clue) cells.
    #[must_use]
    pub fn original(&self) -> &Grid<P::Cell> {
        &self.original
    }

    /// Returns `true` if the cell at `pos` is a given.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn is_given(&self, pos: Position) -> Result<bool, GridError> {
        self.original.is_set(pos)
    }

    /// Replaces the puzzle with a new one.
    ///
    /// The grid may have different extents from the current puzzle. Its clue
    /// cells become the new givens.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid fails the policy's validation; the
    /// puzzle is unchanged in that case.
    pub fn load(&mut self, grid: Grid<P::Cell>) -> Result<(), PuzzleError> {
        self.policy.validate(&grid)?;
        let empty = self.policy.empty_cell();
        self.original = grid.map(empty.clone(), |cell| {
            if self.policy.is_clue(cell) {
                cell.clone()
            } else {
                empty.clone()
            }
        });
        self.working = grid;
        Ok(())
    }

    /// Clears both grids back to the empty value.
    pub fn reset(&mut self) {
        self.working = self.working.cleared();
        self.original = self.original.cleared();
    }

    /// Applies a raw interaction at `pos` through the policy.
    ///
    /// All writes the policy plans are applied together; an out-of-bounds
    /// position leaves both grids unchanged. Writes that store a clue value
    /// also update the given grid, and writes that store a non-clue value
    /// remove any given at that cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] (wrapped) if `pos` is outside the
    /// grid.
    pub fn edit(
        &mut self,
        pos: Position,
        input: &P::Input,
    ) -> Result<EditOperation, PuzzleError> {
        let writes = self.policy.plan_edit(&self.working, pos, input)?;
        if writes.is_empty() {
            return Ok(EditOperation::NoOp);
        }

        let mut working = self.working.clone();
        let mut original = self.original.clone();
        for CellWrite { pos: target, value } in writes {
            let given = if self.policy.is_clue(&value) {
                value.clone()
            } else {
                self.policy.empty_cell()
            };
            working.set(target, value)?;
            original.set(target, given)?;
        }
        self.working = working;
        self.original = original;

        if self.working.is_set(pos)? {
            Ok(EditOperation::Set)
        } else {
            Ok(EditOperation::Cleared)
        }
    }

    /// Writes one revealed cell onto the working grid.
    ///
    /// Given cells are never overwritten; `Ok(false)` is returned for them
    /// and for writes that would not change the cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the write targets a cell outside
    /// the grid.
    pub fn apply_reveal(&mut self, write: &CellWrite<P::Cell>) -> Result<bool, GridError> {
        if self.original.is_set(write.pos)? || *self.working.get(write.pos)? == write.value {
            return Ok(false);
        }
        self.working.set(write.pos, write.value.clone())?;
        Ok(true)
    }

    /// Checks that a solve may be requested.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::MissingPrerequisite`] if the domain requires
    /// something that is absent.
    pub fn check_ready(&self) -> Result<(), PuzzleError> {
        self.policy.check_ready(&self.working)
    }

    /// Captures both grids.
    #[must_use]
    pub fn snapshot(&self) -> PuzzleSnapshot<P::Cell> {
        PuzzleSnapshot {
            working: self.working.clone(),
            original: self.original.clone(),
        }
    }

    /// Restores both grids from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the snapshot was taken
    /// from a puzzle of different extents.
    pub fn restore(&mut self, snapshot: PuzzleSnapshot<P::Cell>) -> Result<(), GridError> {
        self.working.ensure_same_dims(&snapshot.working)?;
        self.working = snapshot.working;
        self.original = snapshot.original;
        Ok(())
    }

    /// Returns cell counts for the working grid.
    #[must_use]
    pub fn stats(&self) -> PuzzleStats {
        let empty = self.policy.empty_cell();
        let cells = self.dims().area();
        let filled = self.working.count_where(|c| *c != empty);
        PuzzleStats {
            cells,
            filled,
            empty: cells - filled,
            given: self.original.count_where(|c| *c != empty),
        }
    }
}

impl PuzzleInstance<PathPolicy> {
    /// Returns the start and goal positions.
    #[must_use]
    pub fn markers(&self) -> PathMarkers {
        PathMarkers::locate(&self.working)
    }

    /// Returns the number of wall cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.working.count_where(|c| c.is_wall())
    }

    /// Returns the number of trail cells currently shown.
    #[must_use]
    pub fn trail_len(&self) -> usize {
        self.working.count_where(|c| *c == MazeCell::Trail)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Click, ConstraintPolicy, PathTool, Prerequisite, TransformPolicy};

    use super::*;

    #[test]
    fn test_constraint_edit_marks_given() {
        let mut puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 9, 9).unwrap();
        let pos = Position::new(0, 3);

        assert_eq!(puzzle.edit(pos, &'6').unwrap(), EditOperation::Set);
        assert_eq!(puzzle.working()[pos], 6);
        assert_eq!(puzzle.original()[pos], 6);
        assert!(puzzle.is_given(pos).unwrap());

        assert_eq!(puzzle.edit(pos, &'0').unwrap(), EditOperation::Cleared);
        assert!(!puzzle.is_given(pos).unwrap());
        assert_eq!(puzzle.stats().given, 0);
    }

    #[test]
    fn test_out_of_bounds_edit_leaves_puzzle_untouched() {
        let mut puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 3, 3).unwrap();
        puzzle.edit(Position::new(1, 1), &'2').unwrap();
        let before = puzzle.clone();

        let err = puzzle.edit(Position::new(3, 0), &'5').unwrap_err();
        assert!(matches!(err, PuzzleError::Grid(GridError::OutOfBounds { .. })));
        assert_eq!(puzzle, before);
    }

    #[test]
    fn test_new_rejects_empty_extents() {
        assert!(matches!(
            PuzzleInstance::new(ConstraintPolicy::default(), 0, 9),
            Err(PuzzleError::Grid(GridError::InvalidDimension { .. }))
        ));
    }

    #[test]
    fn test_transform_edits_are_never_given() {
        let mut puzzle = PuzzleInstance::new(TransformPolicy::default(), 10, 10).unwrap();
        let pos = Position::new(4, 4);
        puzzle.edit(pos, &Click).unwrap();
        puzzle.edit(pos, &Click).unwrap();

        assert_eq!(puzzle.working()[pos], 2);
        assert!(!puzzle.is_given(pos).unwrap());
        assert_eq!(puzzle.stats().filled, 1);
    }

    #[test]
    fn test_path_marker_exclusivity_updates_givens() {
        let mut puzzle = PuzzleInstance::new(PathPolicy, 20, 20).unwrap();
        let a = Position::new(1, 1);
        let b = Position::new(5, 5);

        puzzle.edit(a, &PathTool::Start).unwrap();
        puzzle.edit(b, &PathTool::Start).unwrap();

        assert_eq!(puzzle.markers().start, Some(b));
        assert_eq!(puzzle.working().count_where(|c| c.is_start()), 1);
        assert_eq!(puzzle.original().count_where(|c| c.is_start()), 1);
        assert!(!puzzle.is_given(a).unwrap());
        assert_eq!(
            puzzle.check_ready(),
            Err(PuzzleError::MissingPrerequisite {
                missing: Prerequisite::GoalMarker
            })
        );
    }

    #[test]
    fn test_load_keeps_only_clues_as_givens() {
        use MazeCell::{Goal as G, Open as O, Start as S, Trail as T, Wall as W};
        let grid = Grid::from_rows(&[[S, T, W], [O, T, G]], O).unwrap();
        let puzzle = PuzzleInstance::from_grid(PathPolicy, grid.clone()).unwrap();

        assert_eq!(puzzle.working(), &grid);
        assert_eq!(puzzle.original()[Position::new(0, 1)], O);
        assert_eq!(puzzle.original()[Position::new(0, 2)], W);
        assert_eq!(puzzle.wall_count(), 1);
        assert_eq!(puzzle.trail_len(), 2);
    }

    #[test]
    fn test_apply_reveal_skips_givens() {
        let mut puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 2, 2).unwrap();
        let given = Position::new(0, 0);
        let free = Position::new(1, 1);
        puzzle.edit(given, &'6').unwrap();

        assert!(!puzzle.apply_reveal(&CellWrite::new(given, 1)).unwrap());
        assert_eq!(puzzle.working()[given], 6);
        assert!(puzzle.apply_reveal(&CellWrite::new(free, 4)).unwrap());
        assert!(!puzzle.apply_reveal(&CellWrite::new(free, 4)).unwrap());
        assert!(puzzle.apply_reveal(&CellWrite::new(Position::new(2, 0), 1)).is_err());
    }

    #[test]
    fn test_snapshot_restore_and_reset() {
        let mut puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 2, 2).unwrap();
        let snapshot = puzzle.snapshot();
        puzzle.edit(Position::new(0, 1), &'3').unwrap();
        puzzle.restore(snapshot).unwrap();
        assert_eq!(puzzle.stats().filled, 0);

        puzzle.edit(Position::new(0, 1), &'3').unwrap();
        puzzle.reset();
        assert_eq!(puzzle.stats().filled, 0);
        assert_eq!(puzzle.stats().given, 0);

        let other = PuzzleInstance::new(ConstraintPolicy::default(), 3, 3).unwrap();
        assert!(puzzle.restore(other.snapshot()).is_err());
    }
}
