//! Ordered, cell-by-cell playback of a result grid.

use std::{collections::HashSet, collections::VecDeque, time::Duration};

use gridbench_core::{Grid, GridError};
use gridbench_puzzle::{CellWrite, RevealOrder};

use crate::cancel::CancelFlag;

/// What the animator does on its next step.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum RevealStep<C> {
    /// Write this cell.
    Apply(CellWrite<C>),
    /// Every planned cell has been written.
    Finished,
    /// The reveal was cancelled; nothing more will be written.
    Cancelled,
}

/// Plays back a result grid one cell per step.
#[derive(Debug)]
pub struct RevealAnimator<C> {
    pending: VecDeque<CellWrite<C>>,
    interval: Duration,
    cancel: CancelFlag,
    applied: usize,
}

impl<C: Clone + PartialEq> RevealAnimator<C> {
    /// Computes the cell writes that turn `working` into `result`.
    ///
    /// Cells listed by an explicit `order` come first, followed by every
    /// other cell in row-major order. A cell is skipped if `fixed` holds a
    /// non-default value there or if `working` already equals `result`; a
    /// fully revealed grid therefore plans nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the grids differ in
    /// extents, and [`GridError::OutOfBounds`] if `order` names a cell
    /// outside them.
    pub fn plan(
        working: &Grid<C>,
        result: &Grid<C>,
        fixed: &Grid<C>,
        order: &RevealOrder,
    ) -> Result<Vec<CellWrite<C>>, GridError> {
        working.ensure_same_dims(result)?;
        working.ensure_same_dims(fixed)?;

        let explicit = match order {
            RevealOrder::RowMajor => &[][..],
            RevealOrder::Explicit(positions) => positions.as_slice(),
        };
        let mut seen = HashSet::with_capacity(explicit.len());
        let mut plan = Vec::new();
        let positions = explicit
            .iter()
            .copied()
            .chain(working.dims().positions());
        for pos in positions {
            if !seen.insert(pos) {
                continue;
            }
            let target = result.get(pos)?;
            if fixed.is_set(pos)? || working.get(pos)? == target {
                continue;
            }
            plan.push(CellWrite::new(pos, target.clone()));
        }
        Ok(plan)
    }
}

impl<C> RevealAnimator<C> {
    #[must_use]
    pub fn new(plan: Vec<CellWrite<C>>, interval: Duration, cancel: CancelFlag) -> Self {
        Self {
            pending: plan.into(),
            interval,
            cancel,
            applied: 0,
        }
    }

    /// Returns the pause before each step.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the next step. The cancellation flag is checked first, so a
    /// cancelled reveal never yields another write.
    pub fn next_step(&mut self) -> RevealStep<C> {
        if self.cancel.is_cancelled() {
            self.pending.clear();
            return RevealStep::Cancelled;
        }
        match self.pending.pop_front() {
            Some(write) => {
                self.applied += 1;
                RevealStep::Apply(write)
            }
            None => RevealStep::Finished,
        }
    }

    #[must_use]
    pub fn applied(&self) -> usize {
        self.applied
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}
