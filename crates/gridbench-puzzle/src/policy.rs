use std::fmt;

use gridbench_core::{Grid, GridError, Position};

use crate::{Domain, PuzzleError};

/// A single cell assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite<C> {
    /// Target cell.
    pub pos: Position,
    /// Value to store.
    pub value: C,
}

impl<C> CellWrite<C> {
    /// Creates a cell write.
    #[must_use]
    pub const fn new(pos: Position, value: C) -> Self {
        Self { pos, value }
    }
}

/// The effect an edit had on its target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EditOperation {
    /// The target cell now holds a non-empty value.
    Set,
    /// The target cell was returned to the empty value.
    Cleared,
    /// The input was rejected or would not change anything.
    NoOp,
}

/// Order in which a result grid is revealed onto the working grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOrder {
    /// Top-to-bottom, left-to-right.
    RowMajor,
    /// The listed cells first, then any remaining cells in row-major order.
    Explicit(Vec<Position>),
}

/// Per-domain interaction rules.
///
/// A policy decides what a raw interaction (a typed character, a click, a
/// tool application) does to a grid, which cell values count as puzzle
/// clues, and what must be in place before a solve may start.
///
/// Policies never mutate grids themselves. [`plan_edit`] returns the writes
/// to perform, and [`PuzzleInstance`] applies them all-or-nothing.
///
/// [`plan_edit`]: CellEditPolicy::plan_edit
/// [`PuzzleInstance`]: crate::PuzzleInstance
pub trait CellEditPolicy: fmt::Debug {
    /// The cell value type of this domain.
    type Cell: Clone + PartialEq + fmt::Debug;
    /// The raw interaction this domain accepts.
    type Input: fmt::Debug;

    /// The domain this policy implements.
    const DOMAIN: Domain;

    /// Returns the value of an untouched cell.
    fn empty_cell(&self) -> Self::Cell;

    /// Returns `true` if `cell` is a puzzle clue that a reveal must never
    /// overwrite.
    fn is_clue(&self, cell: &Self::Cell) -> bool;

    /// Computes the writes an interaction at `pos` performs.
    ///
    /// An empty list means the interaction is a no-op (including rejected
    /// input, which is silently ignored).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside `grid`.
    fn plan_edit(
        &self,
        grid: &Grid<Self::Cell>,
        pos: Position,
        input: &Self::Input,
    ) -> Result<Vec<CellWrite<Self::Cell>>, GridError>;

    /// Checks that every cell of a loaded grid is acceptable.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] describing the first violation.
    fn validate(&self, grid: &Grid<Self::Cell>) -> Result<(), PuzzleError>;

    /// Checks the preconditions for a solve request.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::MissingPrerequisite`] if something required is
    /// absent.
    fn check_ready(&self, _grid: &Grid<Self::Cell>) -> Result<(), PuzzleError> {
        Ok(())
    }

    /// Returns the order in which `result` should be revealed.
    fn reveal_order(&self, _result: &Grid<Self::Cell>) -> RevealOrder {
        RevealOrder::RowMajor
    }

    /// Returns the text glyph for a cell.
    fn glyph(&self, cell: &Self::Cell) -> char;

    /// Parses a text glyph into a cell.
    fn parse_glyph(&self, glyph: char) -> Option<Self::Cell>;
}
