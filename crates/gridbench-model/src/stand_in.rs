use std::fmt;

use gridbench_core::Grid;

use crate::InferenceError;

/// A model that maps a submitted grid to a result grid.
///
/// Implementations are synchronous and cheap; the simulated computation
/// delay is added by the caller.
pub trait StandInModel<C>: fmt::Debug {
    /// Returns a short display name.
    fn name(&self) -> &str;

    /// Produces a result grid for `input`.
    ///
    /// # Errors
    ///
    /// Returns an [`InferenceError`] if the input cannot be handled.
    fn infer(&self, input: &Grid<C>) -> Result<Grid<C>, InferenceError>;
}

/// A model that always answers with the same payload.
///
/// The payload is opaque: it is returned as-is whenever the submitted grid
/// has matching extents, whatever the submitted cells are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precomputed<C> {
    name: String,
    payload: Grid<C>,
}

impl<C> Precomputed<C> {
    /// Creates a model answering with `payload`.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: Grid<C>) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &Grid<C> {
        &self.payload
    }
}

impl<C> StandInModel<C> for Precomputed<C>
where
    C: Clone + fmt::Debug,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn infer(&self, input: &Grid<C>) -> Result<Grid<C>, InferenceError> {
        if input.dims() != self.payload.dims() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.payload.dims(),
                actual: input.dims(),
            });
        }
        Ok(self.payload.clone())
    }
}
