use gridbench_core::{Dimensions, GridError, Position};
use gridbench_puzzle::Marker;

/// Failure reported by a stand-in model.
///
/// A failed inference moves the solve session to its `Failed` state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum InferenceError {
    /// The submitted grid does not have the extents the model expects.
    #[display("model expects a {expected} grid, got {actual}")]
    DimensionMismatch {
        /// Extents of the model's payload.
        expected: Dimensions,
        /// Extents of the submitted grid.
        actual: Dimensions,
    },
    /// A maze is missing one of its markers.
    #[display("maze has no {marker} marker")]
    MissingMarker {
        /// The absent marker.
        marker: Marker,
    },
    /// No walkable route connects the markers.
    #[display("no route from {start} to {goal}")]
    NoRoute {
        /// Start marker position.
        start: Position,
        /// Goal marker position.
        goal: Position,
    },
    /// The model produced an out-of-bounds write.
    #[display("{_0}")]
    Grid(#[from] GridError),
}
