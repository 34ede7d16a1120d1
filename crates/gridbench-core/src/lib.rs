//! Core data structures for gridbench.
//!
//! This crate provides the rectangular [`Grid`] container shared by every
//! puzzle domain, together with the [`Position`] and [`Dimensions`] types
//! used to address it.
//!
//! A grid never changes shape after construction. Every coordinate access is
//! bounds-checked and reports [`GridError::OutOfBounds`] instead of
//! panicking, and the only way to change a cell is [`Grid::with_cell`]
//! (which returns a new grid) or [`Grid::set`] (which replaces exactly one
//! cell in place). A failed mutation never leaves a grid partially written.
//!
//! # Examples
//!
//! ```
//! use gridbench_core::{Grid, Position};
//!
//! let empty = Grid::new(9, 9, 0u8)?;
//! let edited = empty.with_cell(Position::new(0, 3), 6)?;
//!
//! assert_eq!(*edited.get(Position::new(0, 3))?, 6);
//! assert_eq!(*empty.get(Position::new(0, 3))?, 0);
//! assert_eq!(edited.count_where(|&v| v != 0), 1);
//! # Ok::<(), gridbench_core::GridError>(())
//! ```

pub use self::{error::*, grid::*, position::*};

mod error;
mod grid;
mod position;
