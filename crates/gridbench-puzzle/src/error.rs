use gridbench_core::{GridError, Position};

use crate::Marker;

/// Something a domain needs before a solve can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Prerequisite {
    /// The path start marker.
    #[display("start marker")]
    StartMarker,
    /// The path goal marker.
    #[display("goal marker")]
    GoalMarker,
}

/// Errors produced while editing or validating a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PuzzleError {
    /// A structural grid error (bad extents or coordinates).
    #[display("{_0}")]
    Grid(#[from] GridError),
    /// A solve was requested before the domain's prerequisites were met.
    #[display("cannot solve yet: {missing} is not placed")]
    MissingPrerequisite {
        /// What is missing.
        missing: Prerequisite,
    },
    /// A loaded grid holds more than one marker of a kind.
    #[display("more than one {marker} marker: {first} and {second}")]
    DuplicateMarker {
        /// The duplicated marker kind.
        marker: Marker,
        /// First occurrence in row-major order.
        first: Position,
        /// Second occurrence in row-major order.
        second: Position,
    },
    /// A loaded grid holds a value the domain does not accept.
    #[display("cell {pos} holds a value outside the domain")]
    InvalidCell {
        /// The offending cell.
        pos: Position,
    },
}
