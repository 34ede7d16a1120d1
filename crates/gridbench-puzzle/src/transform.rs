use std::num::NonZero;

use gridbench_core::{Grid, GridError, Position};

use crate::{CellEditPolicy, CellWrite, Domain, PuzzleError};

/// A click on a palette cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Click;

/// Edit rules for palette grids.
///
/// A click advances the cell to the next palette index, wrapping from the
/// last index back to 0. Palette cells are never clues: the whole predicted
/// pattern replaces the submitted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformPolicy {
    palette_size: NonZero<u8>,
}

const DEFAULT_PALETTE_SIZE: NonZero<u8> = NonZero::new(10).unwrap();

impl Default for TransformPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE_SIZE)
    }
}

impl TransformPolicy {
    /// Creates a policy cycling through `palette_size` colours.
    #[must_use]
    pub const fn new(palette_size: NonZero<u8>) -> Self {
        Self { palette_size }
    }

    /// Returns the number of palette entries.
    #[must_use]
    pub fn palette_size(&self) -> u8 {
        self.palette_size.get()
    }

    fn next_index(self, current: u8) -> u8 {
        let size = u16::from(self.palette_size.get());
        // u16 keeps `current + 1` from overflowing at 255.
        u8::try_from((u16::from(current) + 1) % size).unwrap_or(0)
    }
}

impl CellEditPolicy for TransformPolicy {
    type Cell = u8;
    type Input = Click;

    const DOMAIN: Domain = Domain::Transform;

    fn empty_cell(&self) -> u8 {
        0
    }

    fn is_clue(&self, _cell: &u8) -> bool {
        false
    }

    fn plan_edit(
        &self,
        grid: &Grid<u8>,
        pos: Position,
        _input: &Click,
    ) -> Result<Vec<CellWrite<u8>>, GridError> {
        let current = *grid.get(pos)?;
        let next = self.next_index(current);
        if next == current {
            return Ok(Vec::new());
        }
        Ok(vec![CellWrite::new(pos, next)])
    }

    fn validate(&self, grid: &Grid<u8>) -> Result<(), PuzzleError> {
        match grid.position_where(|&v| v >= self.palette_size.get()) {
            Some(pos) => Err(PuzzleError::InvalidCell { pos }),
            None => Ok(()),
        }
    }

    fn glyph(&self, cell: &u8) -> char {
        char::from_digit(u32::from(*cell), 36).unwrap_or('?')
    }

    fn parse_glyph(&self, glyph: char) -> Option<u8> {
        let index = u8::try_from(glyph.to_digit(36)?).ok()?;
        (index < self.palette_size.get()).then_some(index)
    }
}
