//! Lifecycle of one solve attempt.

use std::time::Duration;

use gridbench_core::Grid;
use gridbench_model::InferenceError;

use crate::cancel::CancelFlag;

/// Identifies a solve session within one workbench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct SessionId(u64);

impl SessionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// State of a [`SolveSession`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum SessionState {
    #[display("idle")]
    Idle,
    #[display("running")]
    Running,
    #[display("revealing")]
    Revealing,
    #[display("complete")]
    Complete,
    #[display("cancelled")]
    Cancelled,
    #[display("failed")]
    Failed,
}

impl SessionState {
    /// Returns `true` while the session owns the puzzle (running or
    /// revealing).
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Revealing)
    }

    /// Returns `true` for states no transition leaves.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Cancelled | Self::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    #[display("session {id} cannot go from {from} to {to}")]
    InvalidTransition {
        id: SessionId,
        from: SessionState,
        to: SessionState,
    },
}

/// One solve attempt.
///
/// Transitions only move forward:
///
/// ```text
/// Idle -> Running -> Complete -> Revealing -> Complete
///            |  \                    |
///            |   -> Failed           |
///            +---------> Cancelled <-+
/// ```
///
/// The result grid is present exactly while the state is `Revealing` or
/// `Complete`.
#[derive(Debug)]
pub struct SolveSession<C> {
    id: SessionId,
    state: SessionState,
    submitted: Grid<C>,
    result: Option<Grid<C>>,
    started_at: Option<Duration>,
    elapsed: Option<Duration>,
    failure: Option<InferenceError>,
    revealed: usize,
    cancel: CancelFlag,
}

impl<C> SolveSession<C> {
    #[must_use]
    pub fn new(id: SessionId, submitted: Grid<C>) -> Self {
        Self {
            id,
            state: SessionState::Idle,
            submitted,
            result: None,
            started_at: None,
            elapsed: None,
            failure: None,
            revealed: 0,
            cancel: CancelFlag::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the grid as it was when the solve was requested.
    #[must_use]
    pub fn submitted(&self) -> &Grid<C> {
        &self.submitted
    }

    #[must_use]
    pub fn result(&self) -> Option<&Grid<C>> {
        self.result.as_ref()
    }

    /// Returns the clock time at which the request was accepted.
    #[must_use]
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Returns the time from acceptance to the model's answer.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    #[must_use]
    pub fn failure(&self) -> Option<&InferenceError> {
        self.failure.as_ref()
    }

    /// Returns the number of cells the reveal has written so far.
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Returns the flag observed by this session's flows.
    #[must_use]
    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    pub fn start(&mut self, now: Duration) -> Result<(), SessionError> {
        self.transition(SessionState::Idle, SessionState::Running)?;
        self.started_at = Some(now);
        Ok(())
    }

    pub fn complete(&mut self, result: Grid<C>, now: Duration) -> Result<(), SessionError> {
        self.transition(SessionState::Running, SessionState::Complete)?;
        self.result = Some(result);
        self.elapsed = self.started_at.map(|start| now.saturating_sub(start));
        Ok(())
    }

    pub fn fail(&mut self, error: InferenceError, now: Duration) -> Result<(), SessionError> {
        self.transition(SessionState::Running, SessionState::Failed)?;
        self.failure = Some(error);
        self.elapsed = self.started_at.map(|start| now.saturating_sub(start));
        Ok(())
    }

    pub fn begin_reveal(&mut self) -> Result<(), SessionError> {
        self.transition(SessionState::Complete, SessionState::Revealing)
    }

    pub fn record_revealed(&mut self) {
        self.revealed += 1;
    }

    pub fn finish_reveal(&mut self) -> Result<(), SessionError> {
        self.transition(SessionState::Revealing, SessionState::Complete)
    }

    /// Cancels a running or revealing session.
    ///
    /// The result is discarded; cells already revealed onto the puzzle are
    /// not touched.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if !self.state.is_active() {
            return Err(self.invalid(SessionState::Cancelled));
        }
        self.state = SessionState::Cancelled;
        self.result = None;
        self.cancel.cancel();
        Ok(())
    }

    fn transition(&mut self, from: SessionState, to: SessionState) -> Result<(), SessionError> {
        if self.state != from {
            return Err(self.invalid(to));
        }
        self.state = to;
        Ok(())
    }

    fn invalid(&self, to: SessionState) -> SessionError {
        SessionError::InvalidTransition {
            id: self.id,
            from: self.state,
            to,
        }
    }
}
