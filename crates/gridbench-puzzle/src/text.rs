//! Plain-text import and export of puzzle grids.
//!
//! A grid is written as one line per row and one glyph per cell. The glyph
//! alphabet is defined by each domain's [`CellEditPolicy`]. Blank lines and
//! trailing whitespace are ignored when parsing.
//!
//! # Examples
//!
//! ```
//! use gridbench_puzzle::{PathPolicy, text};
//!
//! let maze = text::parse_grid(&PathPolicy, "S.#\n..G\n")?;
//! assert_eq!(maze.rows(), 2);
//! assert_eq!(text::format_grid(&PathPolicy, &maze), "S.#\n..G\n");
//! # Ok::<(), gridbench_puzzle::text::ParseGridError>(())
//! ```

use gridbench_core::{Grid, GridError};

use crate::CellEditPolicy;

/// Errors raised while parsing a text grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseGridError {
    /// The input contained no rows.
    #[display("grid text is empty")]
    Empty,
    /// A glyph is not part of the domain's alphabet.
    #[display("invalid glyph {glyph:?} at line {line}, column {column}")]
    InvalidGlyph {
        /// One-based line number.
        line: usize,
        /// One-based column number.
        column: usize,
        /// The offending character.
        glyph: char,
    },
    /// The rows do not form a rectangle.
    #[display("{_0}")]
    Grid(#[from] GridError),
}

/// Parses a text grid using the glyph alphabet of `policy`.
///
/// # Errors
///
/// Returns [`ParseGridError`] if the text is empty, holds an unknown glyph,
/// or is not rectangular.
pub fn parse_grid<P>(policy: &P, text: &str) -> Result<Grid<P::Cell>, ParseGridError>
where
    P: CellEditPolicy,
{
    // Trailing blanks are cells when the alphabet has a glyph for them.
    let blank_is_cell = policy.parse_glyph(' ').is_some();
    let mut rows = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        let line = if blank_is_cell {
            line.trim_end_matches('\r')
        } else {
            line.trim_end()
        };
        if line.is_empty() {
            continue;
        }
        let row = line
            .chars()
            .enumerate()
            .map(|(col_index, glyph)| {
                policy
                    .parse_glyph(glyph)
                    .ok_or(ParseGridError::InvalidGlyph {
                        line: line_index + 1,
                        column: col_index + 1,
                        glyph,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ParseGridError::Empty);
    }
    Ok(Grid::from_rows(&rows, policy.empty_cell())?)
}

/// Formats a grid using the glyph alphabet of `policy`.
///
/// Every row, including the last, ends with a newline.
#[must_use]
pub fn format_grid<P>(policy: &P, grid: &Grid<P::Cell>) -> String
where
    P: CellEditPolicy,
{
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in grid.iter_rows() {
        out.extend(row.iter().map(|cell| policy.glyph(cell)));
        out.push('\n');
    }
    out
}
