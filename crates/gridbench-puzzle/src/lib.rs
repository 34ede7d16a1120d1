//! Puzzle domains, cell edit policies, and the puzzle instance aggregate.
//!
//! Three domains share the same [`Grid`](gridbench_core::Grid) foundation:
//!
//! - [`Domain::Constraint`]: digit grids edited by typing ([`ConstraintPolicy`])
//! - [`Domain::Transform`]: palette grids edited by clicking ([`TransformPolicy`])
//! - [`Domain::Path`]: mazes edited with wall/start/goal tools ([`PathPolicy`])
//!
//! Each policy implements [`CellEditPolicy`], which translates a raw
//! interaction into a set of cell writes. [`PuzzleInstance`] owns the
//! working grid and the grid of given cells and routes every edit through
//! its policy, so adding a domain never touches shared grid code.

pub use self::{
    constraint::*, domain::*, error::*, instance::*, path::*, policy::*, transform::*,
};

mod constraint;
mod domain;
mod error;
mod instance;
mod path;
mod policy;
pub mod text;
mod transform;
