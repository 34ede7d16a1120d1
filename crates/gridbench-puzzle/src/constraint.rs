use gridbench_core::{Grid, GridError, Position};

use crate::{CellEditPolicy, CellWrite, Domain, PuzzleError};

/// Edit rules for digit grids.
///
/// A typed character is parsed as a decimal digit. Values in
/// `0..=max_digit` are stored (`0` clears the cell); anything else is
/// ignored. Every non-zero digit entered by the user is a clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintPolicy {
    max_digit: u8,
}

impl Default for ConstraintPolicy {
    fn default() -> Self {
        Self { max_digit: 9 }
    }
}

impl ConstraintPolicy {
    /// Creates a policy accepting digits up to `max_digit`.
    ///
    /// `max_digit` is capped at 9 so every value has a single-character glyph.
    #[must_use]
    pub fn new(max_digit: u8) -> Self {
        Self {
            max_digit: max_digit.min(9),
        }
    }

    /// Returns the largest accepted digit.
    #[must_use]
    pub fn max_digit(&self) -> u8 {
        self.max_digit
    }

    fn parse_digit(self, input: char) -> Option<u8> {
        let digit = u8::try_from(input.to_digit(10)?).ok()?;
        (digit <= self.max_digit).then_some(digit)
    }
}

impl CellEditPolicy for ConstraintPolicy {
    type Cell = u8;
    type Input = char;

    const DOMAIN: Domain = Domain::Constraint;

    fn empty_cell(&self) -> u8 {
        0
    }

    fn is_clue(&self, cell: &u8) -> bool {
        *cell != 0
    }

    fn plan_edit(
        &self,
        grid: &Grid<u8>,
        pos: Position,
        input: &char,
    ) -> Result<Vec<CellWrite<u8>>, GridError> {
        let current = *grid.get(pos)?;
        match self.parse_digit(*input) {
            Some(digit) if digit != current => Ok(vec![CellWrite::new(pos, digit)]),
            _ => Ok(Vec::new()),
        }
    }

    fn validate(&self, grid: &Grid<u8>) -> Result<(), PuzzleError> {
        match grid.position_where(|&v| v > self.max_digit) {
            Some(pos) => Err(PuzzleError::InvalidCell { pos }),
            None => Ok(()),
        }
    }

    fn glyph(&self, cell: &u8) -> char {
        match cell {
            0 => '.',
            d => char::from_digit(u32::from(*d), 10).unwrap_or('?'),
        }
    }

    fn parse_glyph(&self, glyph: char) -> Option<u8> {
        match glyph {
            '.' => Some(0),
            c => self.parse_digit(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_in_range_are_written() {
        let policy = ConstraintPolicy::default();
        let grid = Grid::new(9, 9, 0u8).unwrap();
        let pos = Position::new(0, 3);

        assert_eq!(
            policy.plan_edit(&grid, pos, &'6').unwrap(),
            [CellWrite::new(pos, 6)]
        );
        // Clearing an empty cell changes nothing.
        assert!(policy.plan_edit(&grid, pos, &'0').unwrap().is_empty());
    }

    #[test]
    fn test_rejected_input_is_a_no_op() {
        let policy = ConstraintPolicy::new(4);
        let grid = Grid::new(4, 4, 0u8).unwrap();
        let pos = Position::new(1, 1);

        for input in ['5', '9', 'x', ' ', '-'] {
            assert!(policy.plan_edit(&grid, pos, &input).unwrap().is_empty());
        }
        assert!(policy.plan_edit(&grid, Position::new(4, 0), &'1').is_err());
    }

    #[test]
    fn test_validate_and_glyphs() {
        let policy = ConstraintPolicy::new(4);
        let grid = Grid::from_rows(&[[1u8, 0], [5, 2]], 0).unwrap();
        assert_eq!(
            policy.validate(&grid),
            Err(PuzzleError::InvalidCell {
                pos: Position::new(1, 0)
            })
        );
        assert_eq!(policy.glyph(&0), '.');
        assert_eq!(policy.glyph(&3), '3');
        assert_eq!(policy.parse_glyph('.'), Some(0));
        assert_eq!(policy.parse_glyph('4'), Some(4));
        assert_eq!(policy.parse_glyph('5'), None);
    }
}
