//! The puzzle aggregate: one puzzle, its edit history and its solve session.

use std::{num::NonZero, rc::Rc, time::Duration};

use gridbench_core::{Grid, Position};
use gridbench_model::{InferenceError, StandInModel};
use gridbench_puzzle::{CellEditPolicy, CellWrite, EditOperation, PuzzleError, PuzzleInstance};

use crate::{
    DEFAULT_MAX_HISTORY_LENGTH,
    action::{ActionRequestQueue, SessionAction},
    clock::Clock,
    flow::{FlowExecutor, tasks},
    history::History,
    reveal::RevealAnimator,
    session::{SessionError, SessionId, SessionState, SolveSession},
    settings::PlaybackSettings,
};

#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum WorkbenchError {
    #[display("{_0}")]
    Puzzle(#[from] PuzzleError),
    #[display("session {id} is still {state}")]
    SessionBusy { id: SessionId, state: SessionState },
    #[display("the puzzle is locked while session {id} is active")]
    EditLocked { id: SessionId },
    #[display("{_0}")]
    Session(#[from] SessionError),
}

/// Something [`Workbench::update`] applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The model answered; the reveal has started.
    Completed { id: SessionId, elapsed: Duration },
    /// The model reported an error.
    Failed { id: SessionId, error: InferenceError },
    /// One cell of the result was written onto the puzzle.
    CellRevealed { id: SessionId, pos: Position },
    /// Every planned cell has been written.
    RevealFinished { id: SessionId },
}

/// One editable puzzle and the solve sessions run against it.
///
/// The workbench is the only writer of its puzzle. Direct edits go through
/// [`edit`](Self::edit) and are refused while a session is running or
/// revealing; revealed cells arrive through [`update`](Self::update), which
/// the owner calls once per frame.
///
/// # Example
///
/// ```
/// use std::{rc::Rc, time::Duration};
///
/// use gridbench_app::{
///     clock::VirtualClock,
///     session::SessionState,
///     settings::PlaybackSettings,
///     workbench::Workbench,
/// };
/// use gridbench_model::samples;
/// use gridbench_puzzle::{ConstraintPolicy, PuzzleInstance};
///
/// let clock = VirtualClock::new();
/// let puzzle =
///     PuzzleInstance::from_grid(ConstraintPolicy::default(), samples::constraint_puzzle())?;
/// let mut bench = Workbench::new(
///     puzzle,
///     Rc::new(samples::constraint_model()),
///     PlaybackSettings::default(),
///     Rc::new(clock.clone()),
/// );
///
/// bench.request_solve()?;
/// while bench.is_active() {
///     bench.update();
///     clock.advance(Duration::from_millis(50));
/// }
/// assert_eq!(bench.session_state(), SessionState::Complete);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Workbench<P: CellEditPolicy> {
    puzzle: PuzzleInstance<P>,
    model: Rc<dyn StandInModel<P::Cell>>,
    settings: PlaybackSettings,
    clock: Rc<dyn Clock>,
    executor: FlowExecutor<SessionAction<P::Cell>>,
    queue: ActionRequestQueue<SessionAction<P::Cell>>,
    session: Option<SolveSession<P::Cell>>,
    next_id: u64,
    history: History<P::Cell>,
}

const HISTORY_CAPACITY: NonZero<usize> = NonZero::new(DEFAULT_MAX_HISTORY_LENGTH).unwrap();

impl<P> Workbench<P>
where
    P: CellEditPolicy,
    P::Cell: 'static,
{
    #[must_use]
    pub fn new(
        puzzle: PuzzleInstance<P>,
        model: Rc<dyn StandInModel<P::Cell>>,
        settings: PlaybackSettings,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let mut history = History::new(HISTORY_CAPACITY);
        history.reset(&puzzle);
        Self {
            puzzle,
            model,
            settings,
            executor: FlowExecutor::new(Rc::clone(&clock)),
            clock,
            queue: ActionRequestQueue::default(),
            session: None,
            next_id: 1,
            history,
        }
    }

    #[must_use]
    pub fn puzzle(&self) -> &PuzzleInstance<P> {
        &self.puzzle
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    #[must_use]
    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    /// Replaces the timing used by later solve requests.
    pub fn set_settings(&mut self, settings: PlaybackSettings) {
        self.settings = settings;
    }

    /// Returns the latest session, active or not.
    #[must_use]
    pub fn session(&self) -> Option<&SolveSession<P::Cell>> {
        self.session.as_ref()
    }

    /// Returns the latest session's state, or `Idle` if there is none.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, SolveSession::state)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session_state().is_active()
    }

    /// Applies a raw interaction through the puzzle's policy.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::EditLocked`] while a session is active and
    /// [`WorkbenchError::Puzzle`] for out-of-bounds positions.
    pub fn edit(
        &mut self,
        pos: Position,
        input: &P::Input,
    ) -> Result<EditOperation, WorkbenchError> {
        self.ensure_unlocked()?;
        let op = self.puzzle.edit(pos, input)?;
        if !op.is_no_op() {
            self.history.push(&self.puzzle);
        }
        Ok(op)
    }

    /// Replaces the puzzle. An active session is cancelled and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Puzzle`] if the grid fails validation;
    /// nothing changes in that case.
    pub fn load(&mut self, grid: Grid<P::Cell>) -> Result<(), WorkbenchError> {
        self.puzzle.load(grid)?;
        self.abandon_session();
        self.history.reset(&self.puzzle);
        Ok(())
    }

    /// Clears the puzzle. An active session is cancelled and dropped.
    pub fn reset(&mut self) {
        self.abandon_session();
        self.puzzle.reset();
        self.history.reset(&self.puzzle);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.is_active() && self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.is_active() && self.history.can_redo()
    }

    pub fn undo(&mut self) -> Result<bool, WorkbenchError> {
        self.ensure_unlocked()?;
        Ok(self.history.undo(&mut self.puzzle))
    }

    pub fn redo(&mut self) -> Result<bool, WorkbenchError> {
        self.ensure_unlocked()?;
        Ok(self.history.redo(&mut self.puzzle))
    }

    /// Starts a solve of the current working grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::SessionBusy`] if a session is running or
    /// revealing, and [`WorkbenchError::Puzzle`] carrying
    /// [`PuzzleError::MissingPrerequisite`] if the domain is not ready. The
    /// current session is untouched in both cases.
    pub fn request_solve(&mut self) -> Result<SessionId, WorkbenchError> {
        if let Some(session) = self.session.as_ref().filter(|s| s.state().is_active()) {
            return Err(WorkbenchError::SessionBusy {
                id: session.id(),
                state: session.state(),
            });
        }
        self.puzzle.check_ready()?;

        let id = SessionId::new(self.next_id);
        self.next_id += 1;
        let mut session = SolveSession::new(id, self.puzzle.working().clone());
        session.start(self.clock.now())?;

        log::info!(
            "session {id}: {} solve accepted by {}",
            self.puzzle.domain(),
            self.model.name()
        );
        tasks::spawn_solve_flow(
            &mut self.executor,
            Rc::clone(&self.model),
            tasks::SolveRequest {
                id,
                submitted: session.submitted().clone(),
                delay: self.settings.solve_delay,
                cancel: session.cancel_flag().clone(),
            },
        );
        self.session = Some(session);
        Ok(id)
    }

    /// Cancels the active session.
    ///
    /// Returns `false` if no session was running or revealing. Cells already
    /// revealed stay on the puzzle.
    pub fn cancel(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.cancel().is_err() {
            return false;
        }
        log::info!(
            "session {}: cancelled after {} revealed cells",
            session.id(),
            session.revealed()
        );
        if session.revealed() > 0 {
            self.history.push(&self.puzzle);
        }
        true
    }

    /// Advances the session's flows and applies what they produced.
    pub fn update(&mut self) -> Vec<SessionEvent> {
        self.executor.poll(&mut self.queue);
        self.queue
            .take_all()
            .into_iter()
            .filter_map(|action| self.apply(action))
            .collect()
    }

    fn ensure_unlocked(&self) -> Result<(), WorkbenchError> {
        match &self.session {
            Some(session) if session.state().is_active() => {
                Err(WorkbenchError::EditLocked { id: session.id() })
            }
            _ => Ok(()),
        }
    }

    fn abandon_session(&mut self) {
        if let Some(mut session) = self.session.take()
            && session.cancel().is_ok()
        {
            log::info!("session {}: abandoned", session.id());
        }
    }

    fn apply(&mut self, action: SessionAction<P::Cell>) -> Option<SessionEvent> {
        let current = self
            .session
            .as_ref()
            .filter(|s| s.state().is_active())
            .map(SolveSession::id);
        if current != Some(action.session_id()) {
            log::debug!(
                "dropping action for inactive session {}",
                action.session_id()
            );
            return None;
        }

        match action {
            SessionAction::InferenceFinished { id, outcome } => {
                self.on_inference_finished(id, outcome)
            }
            SessionAction::RevealCell { id, write } => self.on_reveal_cell(id, &write),
            SessionAction::RevealFinished { id } => self.on_reveal_finished(id),
        }
    }

    fn on_inference_finished(
        &mut self,
        id: SessionId,
        outcome: Result<Grid<P::Cell>, InferenceError>,
    ) -> Option<SessionEvent> {
        let session = self.session.as_mut()?;
        let now = self.clock.now();

        // Every cell holding a value at submission is kept, not only givens.
        let planned = outcome.and_then(|result| {
            let order = self.puzzle.policy().reveal_order(&result);
            let submitted = session.submitted();
            let plan = RevealAnimator::plan(submitted, &result, submitted, &order)?;
            Ok((result, plan))
        });

        match planned {
            Ok((result, plan)) => {
                if let Err(err) = session
                    .complete(result, now)
                    .and_then(|()| session.begin_reveal())
                {
                    log::debug!("{err}");
                    return None;
                }
                let elapsed = session.elapsed().unwrap_or_default();
                log::info!(
                    "session {id}: answered in {elapsed:?}, revealing {} cells",
                    plan.len()
                );
                let animator = RevealAnimator::new(
                    plan,
                    self.settings.reveal_interval,
                    session.cancel_flag().clone(),
                );
                tasks::spawn_reveal_flow(&mut self.executor, id, animator);
                Some(SessionEvent::Completed { id, elapsed })
            }
            Err(error) => {
                log::info!("session {id}: failed: {error}");
                if let Err(err) = session.fail(error.clone(), now) {
                    log::debug!("{err}");
                    return None;
                }
                Some(SessionEvent::Failed { id, error })
            }
        }
    }

    fn on_reveal_cell(
        &mut self,
        id: SessionId,
        write: &CellWrite<P::Cell>,
    ) -> Option<SessionEvent> {
        let session = self.session.as_mut()?;
        if !session.state().is_revealing() {
            return None;
        }
        match self.puzzle.apply_reveal(write) {
            Ok(true) => {
                session.record_revealed();
                log::trace!("session {id}: revealed {}", write.pos);
                Some(SessionEvent::CellRevealed { id, pos: write.pos })
            }
            Ok(false) => {
                log::debug!("session {id}: {} already up to date", write.pos);
                None
            }
            Err(err) => {
                log::debug!("session {id}: reveal skipped: {err}");
                None
            }
        }
    }

    fn on_reveal_finished(&mut self, id: SessionId) -> Option<SessionEvent> {
        let session = self.session.as_mut()?;
        if let Err(err) = session.finish_reveal() {
            log::debug!("{err}");
            return None;
        }
        log::info!("session {id}: complete, {} cells revealed", session.revealed());
        if session.revealed() > 0 {
            self.history.push(&self.puzzle);
        }
        Some(SessionEvent::RevealFinished { id })
    }
}

#[cfg(test)]
mod tests {
    use std::{rc::Rc, time::Duration};

    use gridbench_core::{Dimensions, Grid, Position};
    use gridbench_model::{InferenceError, PathFinder, Precomputed, StandInModel, samples};
    use gridbench_puzzle::{
        CellEditPolicy, Click, ConstraintPolicy, MazeCell, PathPolicy, PathTool, Prerequisite,
        PuzzleError, PuzzleInstance, TransformPolicy, text,
    };

    use super::*;
    use crate::clock::VirtualClock;

    const STEP: Duration = Duration::from_millis(50);

    fn bench<P>(
        puzzle: PuzzleInstance<P>,
        model: impl StandInModel<P::Cell> + 'static,
    ) -> (VirtualClock, Workbench<P>)
    where
        P: CellEditPolicy,
        P::Cell: 'static,
    {
        let clock = VirtualClock::new();
        let bench = Workbench::new(
            puzzle,
            Rc::new(model),
            PlaybackSettings::for_domain(P::DOMAIN),
            Rc::new(clock.clone()),
        );
        (clock, bench)
    }

    fn run_until_settled<P>(bench: &mut Workbench<P>, clock: &VirtualClock) -> Vec<SessionEvent>
    where
        P: CellEditPolicy,
        P::Cell: 'static,
    {
        let mut events = bench.update();
        for _ in 0..10_000 {
            if !bench.is_active() {
                break;
            }
            clock.advance(STEP);
            events.extend(bench.update());
        }
        events
    }

    fn advance(
        bench: &mut Workbench<impl CellEditPolicy<Cell = u8>>,
        clock: &VirtualClock,
        total: Duration,
    ) -> Vec<SessionEvent> {
        let mut events = bench.update();
        let mut waited = Duration::ZERO;
        while waited < total {
            clock.advance(STEP);
            waited += STEP;
            events.extend(bench.update());
        }
        events
    }

    fn empty_constraint() -> (VirtualClock, Workbench<ConstraintPolicy>) {
        let puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 9, 9).unwrap();
        bench(puzzle, samples::constraint_model())
    }

    #[test]
    fn constraint_solve_keeps_givens() {
        let (clock, mut bench) = empty_constraint();
        let clue = Position::new(0, 3);
        let conflicting = Position::new(0, 0);
        bench.edit(clue, &'6').unwrap();
        bench.edit(conflicting, &'9').unwrap();
        assert_eq!(bench.puzzle().original()[clue], 6);
        assert!(bench.puzzle().is_given(clue).unwrap());

        let id = bench.request_solve().unwrap();
        assert_eq!(bench.session_state(), SessionState::Running);

        let events = run_until_settled(&mut bench, &clock);
        assert_eq!(
            events.first(),
            Some(&SessionEvent::Completed {
                id,
                elapsed: Duration::from_secs(2),
            })
        );
        assert_eq!(events.last(), Some(&SessionEvent::RevealFinished { id }));
        assert_eq!(bench.session_state(), SessionState::Complete);

        let working = bench.puzzle().working();
        assert_eq!(working[clue], 6);
        assert_eq!(working[conflicting], 9);
        let payload = samples::constraint_model();
        for (pos, value) in working.iter() {
            if pos != conflicting {
                assert_eq!(value, &payload.payload()[pos], "{pos}");
            }
        }
        let revealed = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::CellRevealed { .. }))
            .count();
        assert_eq!(revealed, 79);
        assert_eq!(bench.session().unwrap().revealed(), 79);
    }

    #[test]
    fn reveal_is_row_major_for_constraint_grids() {
        let (clock, mut bench) = empty_constraint();
        bench.request_solve().unwrap();
        let positions: Vec<_> = run_until_settled(&mut bench, &clock)
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::CellRevealed { pos, .. } => Some(pos),
                _ => None,
            })
            .collect();
        let expected: Vec<_> = Dimensions::new(9, 9).positions().collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn second_solve_of_revealed_grid_changes_nothing() {
        let (clock, mut bench) = empty_constraint();
        bench.request_solve().unwrap();
        run_until_settled(&mut bench, &clock);
        let revealed = bench.puzzle().working().clone();

        let id = bench.request_solve().unwrap();
        let events = run_until_settled(&mut bench, &clock);
        assert!(
            events
                .iter()
                .all(|e| !matches!(e, SessionEvent::CellRevealed { .. }))
        );
        assert_eq!(events.last(), Some(&SessionEvent::RevealFinished { id }));
        assert_eq!(bench.puzzle().working(), &revealed);
    }

    #[test]
    fn path_solve_requires_both_markers() {
        let puzzle = PuzzleInstance::new(PathPolicy, 20, 20).unwrap();
        let (clock, mut bench) = bench(puzzle, PathFinder);
        let start = Position::new(1, 1);
        bench.edit(start, &PathTool::Start).unwrap();

        assert_eq!(
            bench.request_solve(),
            Err(WorkbenchError::Puzzle(PuzzleError::MissingPrerequisite {
                missing: Prerequisite::GoalMarker,
            }))
        );
        assert_eq!(bench.session_state(), SessionState::Idle);

        bench.edit(Position::new(18, 18), &PathTool::Goal).unwrap();
        bench.request_solve().unwrap();
        assert_eq!(bench.session_state(), SessionState::Running);

        let events = run_until_settled(&mut bench, &clock);
        assert_eq!(bench.session_state(), SessionState::Complete);
        assert_eq!(bench.puzzle().trail_len(), 33);

        let first = events.iter().find_map(|e| match e {
            SessionEvent::CellRevealed { pos, .. } => Some(*pos),
            _ => None,
        });
        let first = first.unwrap();
        assert!(Dimensions::new(20, 20).neighbors(start).any(|p| p == first));
    }

    #[test]
    fn cancelled_session_ignores_late_result() {
        let (clock, mut bench) = empty_constraint();
        let before = bench.puzzle().working().clone();
        bench.request_solve().unwrap();
        bench.update();
        clock.advance(Duration::from_millis(500));
        bench.update();

        assert!(bench.cancel());
        assert!(!bench.cancel());
        let events = advance(&mut bench, &clock, Duration::from_secs(5));

        assert!(events.is_empty());
        assert_eq!(bench.session_state(), SessionState::Cancelled);
        assert!(bench.session().unwrap().result().is_none());
        assert_eq!(bench.puzzle().working(), &before);
    }

    #[test]
    fn cancel_during_reveal_keeps_partial_result() {
        let (clock, mut bench) = empty_constraint();
        bench.request_solve().unwrap();
        let mut revealed = 0;
        while revealed < 5 {
            clock.advance(STEP);
            revealed += bench
                .update()
                .iter()
                .filter(|e| matches!(e, SessionEvent::CellRevealed { .. }))
                .count();
        }
        assert_eq!(bench.session_state(), SessionState::Revealing);

        assert!(bench.cancel());
        let events = advance(&mut bench, &clock, Duration::from_secs(1));
        assert!(events.is_empty());
        assert_eq!(bench.session_state(), SessionState::Cancelled);
        assert_eq!(bench.puzzle().stats().filled, 5);
        assert_eq!(bench.session().unwrap().revealed(), 5);
    }

    #[test]
    fn busy_session_rejects_new_request() {
        let (_clock, mut bench) = empty_constraint();
        let id = bench.request_solve().unwrap();
        assert_eq!(
            bench.request_solve(),
            Err(WorkbenchError::SessionBusy {
                id,
                state: SessionState::Running,
            })
        );
        let session = bench.session().unwrap();
        assert_eq!(session.id(), id);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn edits_are_locked_while_active() {
        let (clock, mut bench) = empty_constraint();
        let id = bench.request_solve().unwrap();
        assert_eq!(
            bench.edit(Position::new(0, 0), &'1'),
            Err(WorkbenchError::EditLocked { id })
        );
        assert_eq!(bench.undo(), Err(WorkbenchError::EditLocked { id }));

        run_until_settled(&mut bench, &clock);
        assert!(bench.edit(Position::new(0, 0), &'1').is_ok());
    }

    #[test]
    fn busy_and_locked_while_revealing() {
        let (clock, mut bench) = empty_constraint();
        bench.edit(Position::new(4, 4), &'5').unwrap();
        let id = bench.request_solve().unwrap();
        bench.update();
        while bench.session_state() == SessionState::Running {
            clock.advance(STEP);
            bench.update();
        }
        assert_eq!(bench.session_state(), SessionState::Revealing);
        let before = bench.puzzle().working().clone();

        assert_eq!(
            bench.request_solve(),
            Err(WorkbenchError::SessionBusy {
                id,
                state: SessionState::Revealing,
            })
        );
        assert_eq!(
            bench.edit(Position::new(8, 8), &'1'),
            Err(WorkbenchError::EditLocked { id })
        );
        assert_eq!(bench.undo(), Err(WorkbenchError::EditLocked { id }));
        assert_eq!(bench.redo(), Err(WorkbenchError::EditLocked { id }));
        assert!(!bench.can_undo());

        assert_eq!(bench.puzzle().working(), &before);
        assert_eq!(bench.session().unwrap().id(), id);
        assert_eq!(bench.session_state(), SessionState::Revealing);
    }

    #[test]
    fn painted_transform_cell_survives_reveal() {
        let puzzle = PuzzleInstance::new(TransformPolicy::default(), 2, 2).unwrap();
        let payload = Grid::new(2, 2, 2u8).unwrap();
        let (clock, mut bench) = bench(puzzle, Precomputed::new("all twos", payload));
        let painted = Position::new(0, 0);
        bench.edit(painted, &Click).unwrap();
        assert_eq!(bench.puzzle().working()[painted], 1);

        bench.request_solve().unwrap();
        let events = run_until_settled(&mut bench, &clock);
        assert_eq!(bench.session_state(), SessionState::Complete);

        let working = bench.puzzle().working();
        assert_eq!(working[painted], 1);
        for (pos, value) in working.iter().filter(|(pos, _)| *pos != painted) {
            assert_eq!(*value, 2, "{pos}");
        }
        let revealed = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::CellRevealed { .. }))
            .count();
        assert_eq!(revealed, 3);
    }

    #[test]
    fn trail_present_at_submission_survives_reveal() {
        let grid = text::parse_grid(&PathPolicy, "S...G\n.o...\n").unwrap();
        let puzzle = PuzzleInstance::from_grid(PathPolicy, grid).unwrap();
        let (clock, mut bench) = bench(puzzle, PathFinder);

        bench.request_solve().unwrap();
        run_until_settled(&mut bench, &clock);
        assert_eq!(bench.session_state(), SessionState::Complete);

        let working = bench.puzzle().working();
        assert_eq!(working[Position::new(1, 1)], MazeCell::Trail);
        assert_eq!(text::format_grid(&PathPolicy, working), "SoooG\n.o...\n");
        assert_eq!(bench.puzzle().trail_len(), 4);
    }

    #[test]
    fn model_error_fails_session() {
        let puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 3, 3).unwrap();
        let (clock, mut bench) = bench(puzzle, samples::constraint_model());
        let id = bench.request_solve().unwrap();
        let events = run_until_settled(&mut bench, &clock);

        let error = InferenceError::DimensionMismatch {
            expected: Dimensions::new(9, 9),
            actual: Dimensions::new(3, 3),
        };
        assert_eq!(
            events,
            [SessionEvent::Failed {
                id,
                error: error.clone()
            }]
        );
        assert_eq!(bench.session_state(), SessionState::Failed);
        assert_eq!(bench.session().unwrap().failure(), Some(&error));
        assert!(bench.session().unwrap().result().is_none());
    }

    #[test]
    fn load_abandons_active_session() {
        let (clock, mut bench) = empty_constraint();
        bench.request_solve().unwrap();
        bench.update();

        bench.load(samples::constraint_puzzle()).unwrap();
        assert!(bench.session().is_none());
        assert_eq!(bench.session_state(), SessionState::Idle);

        let events = advance(&mut bench, &clock, Duration::from_secs(3));
        assert!(events.is_empty());
        assert_eq!(bench.puzzle().working(), &samples::constraint_puzzle());
    }

    #[test]
    fn undo_and_redo_follow_edits_and_reveals() {
        let (clock, mut bench) = empty_constraint();
        bench.edit(Position::new(4, 4), &'5').unwrap();
        assert!(bench.can_undo());

        bench.request_solve().unwrap();
        run_until_settled(&mut bench, &clock);
        assert_eq!(bench.puzzle().stats().filled, 81);

        assert!(bench.undo().unwrap());
        assert_eq!(bench.puzzle().stats().filled, 1);
        assert!(bench.undo().unwrap());
        assert_eq!(bench.puzzle().stats().filled, 0);
        assert!(!bench.undo().unwrap());
        assert!(bench.redo().unwrap());
        assert_eq!(bench.puzzle().stats().given, 1);
    }

    #[test]
    fn reset_clears_puzzle_and_history() {
        let (_clock, mut bench) = empty_constraint();
        bench.edit(Position::new(0, 0), &'3').unwrap();
        bench.reset();
        assert_eq!(bench.puzzle().stats().filled, 0);
        assert!(!bench.can_undo());
    }

    #[derive(Debug)]
    struct Echo;

    impl StandInModel<u8> for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn infer(&self, input: &Grid<u8>) -> Result<Grid<u8>, InferenceError> {
            Ok(input.clone())
        }
    }

    #[test]
    fn identical_answer_finishes_with_empty_reveal() {
        let puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 2, 2).unwrap();
        let (clock, mut bench) = bench(puzzle, Echo);
        let id = bench.request_solve().unwrap();
        let events = run_until_settled(&mut bench, &clock);
        assert!(matches!(events.as_slice(), [
            SessionEvent::Completed { .. },
            SessionEvent::RevealFinished { id: finished },
        ] if *finished == id));
        assert_eq!(bench.model_name(), "echo");
    }

    #[test]
    fn precomputed_payload_is_not_validated() {
        // A payload full of out-of-range digits is still revealed as-is.
        let puzzle = PuzzleInstance::new(ConstraintPolicy::default(), 1, 2).unwrap();
        let payload = Grid::from_array([[42u8, 0]], 0);
        let (clock, mut bench) = bench(puzzle, Precomputed::new("odd", payload));
        bench.request_solve().unwrap();
        run_until_settled(&mut bench, &clock);
        assert_eq!(bench.puzzle().working()[Position::new(0, 0)], 42);
    }
}
