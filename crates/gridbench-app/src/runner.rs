//! Terminal front end: prints samples, plays back solves, runs training.
//!
//! The runner is a presentation layer over [`Workbench`] and
//! [`TrainingSimulator`]; it only reads their state and calls their public
//! operations. With `--instant` it drives a [`VirtualClock`] instead of
//! sleeping, so every playback finishes immediately with the same output.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    rc::Rc,
    thread,
    time::Duration,
};

use gridbench_core::Grid;
use gridbench_model::{PathFinder, StandInModel, samples};
use gridbench_puzzle::{
    CellEditPolicy, ConstraintPolicy, Domain, PathPolicy, PuzzleError, PuzzleInstance,
    TransformPolicy, text,
};
use gridbench_trainer::{
    DatasetKind, RunSeed, TrainingConfig, TrainingConfigError, TrainingRun, TrainingSample,
};
use serde::Serialize;

use crate::{
    clock::{Clock, SystemClock, VirtualClock},
    session::SessionState,
    settings::PlaybackSettings,
    training::{DEFAULT_TICK_INTERVAL, TrainingSimulator},
    version::build_version,
    workbench::{SessionEvent, Workbench, WorkbenchError},
};

/// Time between two workbench updates during a solve.
const FRAME: Duration = Duration::from_millis(10);

/// Revealed cells between two progress lines.
const PROGRESS_EVERY: usize = 10;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum RunnerError {
    #[display("I/O error: {_0}")]
    Io(#[from] io::Error),
    #[display("{_0}")]
    Parse(#[from] text::ParseGridError),
    #[display("{_0}")]
    Puzzle(#[from] PuzzleError),
    #[display("{_0}")]
    Workbench(#[from] WorkbenchError),
    #[display("invalid training configuration: {_0}")]
    Config(#[from] TrainingConfigError),
    #[display("JSON output failed: {_0}")]
    Json(#[from] serde_json::Error),
    #[display("speed must be a positive number, got {speed}")]
    InvalidSpeed { speed: f64 },
}

#[derive(Debug, Clone, clap::Args)]
pub struct SampleArgs {
    /// Puzzle domain: constraint, transform or path.
    pub domain: Domain,
}

#[derive(Debug, Clone, clap::Args)]
pub struct SolveArgs {
    /// Puzzle domain: constraint, transform or path.
    pub domain: Domain,
    /// Text grid to solve instead of the domain's sample.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Playback speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,
    /// Cancel the session this many milliseconds after it was accepted.
    #[arg(long)]
    pub cancel_after_ms: Option<u64>,
    /// Run on a virtual clock instead of waiting.
    #[arg(long)]
    pub instant: bool,
    /// Print a JSON report instead of progress lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct TrainArgs {
    /// Dataset: sudoku, arc or maze.
    #[arg(long, default_value_t = DatasetKind::default())]
    pub dataset: DatasetKind,
    /// Step at which the run stops by itself.
    #[arg(long, default_value_t = TrainingConfig::default().target_steps)]
    pub target_steps: u32,
    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,
    /// Noise seed as 64 hex digits; derived from the configuration if absent.
    #[arg(long)]
    pub seed: Option<RunSeed>,
    /// Stop the run after this many ticks.
    #[arg(long)]
    pub stop_after_ticks: Option<u32>,
    /// Run on a virtual clock instead of waiting.
    #[arg(long)]
    pub instant: bool,
    /// Print the run summary as JSON instead of sample lines.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of a solve, as printed by `solve --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    pub domain: String,
    pub model: String,
    pub state: String,
    pub elapsed_ms: Option<u128>,
    pub revealed: usize,
    pub filled: usize,
    pub empty: usize,
    pub given: usize,
    pub grid: Vec<String>,
}

impl SolveReport {
    /// Returns `true` if the session ended in `state`.
    #[must_use]
    pub fn ended_in(&self, state: SessionState) -> bool {
        self.state == state.to_string()
    }
}

/// Waits between updates, or advances a virtual clock.
#[derive(Debug)]
enum Pacer {
    Real,
    Instant(VirtualClock),
}

impl Pacer {
    fn new(instant: bool) -> (Self, Rc<dyn Clock>) {
        if instant {
            let clock = VirtualClock::new();
            (Self::Instant(clock.clone()), Rc::new(clock))
        } else {
            (Self::Real, Rc::new(SystemClock::new()))
        }
    }

    fn wait(&self, duration: Duration) {
        match self {
            Self::Real => thread::sleep(duration),
            Self::Instant(clock) => clock.advance(duration),
        }
    }
}

/// Prints the sample puzzle of `domain`.
pub fn run_sample(out: &mut impl Write, args: &SampleArgs) -> Result<(), RunnerError> {
    let grid = match args.domain {
        Domain::Constraint => {
            text::format_grid(&ConstraintPolicy::default(), &samples::constraint_puzzle())
        }
        Domain::Transform => {
            text::format_grid(&TransformPolicy::default(), &samples::transform_puzzle())
        }
        Domain::Path => text::format_grid(&PathPolicy, &samples::maze_puzzle()),
    };
    write!(out, "{grid}")?;
    Ok(())
}

/// Loads a puzzle, solves it and plays back the reveal.
pub fn run_solve(out: &mut impl Write, args: &SolveArgs) -> Result<SolveReport, RunnerError> {
    if !(args.speed.is_finite() && args.speed > 0.0) {
        return Err(RunnerError::InvalidSpeed { speed: args.speed });
    }
    match args.domain {
        Domain::Constraint => {
            let policy = ConstraintPolicy::default();
            let grid = load_grid(&policy, args, samples::constraint_puzzle)?;
            let puzzle = PuzzleInstance::from_grid(policy, grid)?;
            let (report, _) = solve(out, puzzle, Rc::new(samples::constraint_model()), args)?;
            Ok(report)
        }
        Domain::Transform => {
            let policy = TransformPolicy::default();
            let grid = load_grid(&policy, args, samples::transform_puzzle)?;
            let puzzle = PuzzleInstance::from_grid(policy, grid)?;
            let (report, _) = solve(out, puzzle, Rc::new(samples::transform_model()), args)?;
            Ok(report)
        }
        Domain::Path => {
            let grid = load_grid(&PathPolicy, args, samples::maze_puzzle)?;
            let puzzle = PuzzleInstance::from_grid(PathPolicy, grid)?;
            let (report, bench) = solve(out, puzzle, Rc::new(PathFinder), args)?;
            if !args.json {
                let puzzle = bench.puzzle();
                let markers = puzzle.markers();
                writeln!(
                    out,
                    "walls: {}, trail: {}, start: {}, goal: {}",
                    puzzle.wall_count(),
                    puzzle.trail_len(),
                    markers.start.map_or("-".to_owned(), |p| p.to_string()),
                    markers.goal.map_or("-".to_owned(), |p| p.to_string()),
                )?;
            }
            Ok(report)
        }
    }
}

fn load_grid<P: CellEditPolicy>(
    policy: &P,
    args: &SolveArgs,
    sample: fn() -> Grid<P::Cell>,
) -> Result<Grid<P::Cell>, RunnerError> {
    match &args.input {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(text::parse_grid(policy, &contents)?)
        }
        None => Ok(sample()),
    }
}

fn solve<P>(
    out: &mut impl Write,
    puzzle: PuzzleInstance<P>,
    model: Rc<dyn StandInModel<P::Cell>>,
    args: &SolveArgs,
) -> Result<(SolveReport, Workbench<P>), RunnerError>
where
    P: CellEditPolicy,
    P::Cell: 'static,
{
    let (pacer, clock) = Pacer::new(args.instant);
    let settings = PlaybackSettings::for_domain(P::DOMAIN).scaled(args.speed.recip());
    let mut bench = Workbench::new(puzzle, model, settings, Rc::clone(&clock));
    let policy = bench.puzzle().policy();
    let verbose = !args.json;

    if verbose {
        writeln!(
            out,
            "gridbench {}: {} solve by {}",
            build_version(),
            P::DOMAIN,
            bench.model_name()
        )?;
        write!(out, "{}", text::format_grid(policy, bench.puzzle().working()))?;
    }

    let id = bench.request_solve()?;
    let accepted_at = clock.now();
    let cancel_after = args.cancel_after_ms.map(Duration::from_millis);
    let mut revealed = 0;

    while bench.is_active() {
        if let Some(limit) = cancel_after
            && clock.now().saturating_sub(accepted_at) >= limit
            && bench.cancel()
        {
            if verbose {
                writeln!(out, "session {id} cancelled after {revealed} revealed cells")?;
            }
            break;
        }
        for event in bench.update() {
            match event {
                SessionEvent::Completed { elapsed, .. } if verbose => {
                    writeln!(out, "model answered in {elapsed:?}")?;
                }
                SessionEvent::Failed { error, .. } if verbose => {
                    writeln!(out, "model failed: {error}")?;
                }
                SessionEvent::CellRevealed { .. } => {
                    revealed += 1;
                    if verbose && revealed % PROGRESS_EVERY == 0 {
                        writeln!(out, "revealed {revealed} cells")?;
                    }
                }
                _ => {}
            }
        }
        if bench.is_active() {
            pacer.wait(FRAME);
        }
    }

    let report = build_report(&bench, revealed);
    if verbose {
        let puzzle = bench.puzzle();
        write!(out, "{}", text::format_grid(puzzle.policy(), puzzle.working()))?;
        writeln!(
            out,
            "session {id} {}: {} cells revealed, {} filled, {} empty, {} given",
            report.state, report.revealed, report.filled, report.empty, report.given
        )?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    }
    Ok((report, bench))
}

fn build_report<P>(bench: &Workbench<P>, revealed: usize) -> SolveReport
where
    P: CellEditPolicy,
    P::Cell: 'static,
{
    let puzzle = bench.puzzle();
    let stats = puzzle.stats();
    let session = bench.session();
    SolveReport {
        domain: P::DOMAIN.to_string(),
        model: bench.model_name().to_owned(),
        state: bench.session_state().to_string(),
        elapsed_ms: session.and_then(|s| s.elapsed()).map(|d| d.as_millis()),
        revealed,
        filled: stats.filled,
        empty: stats.empty,
        given: stats.given,
        grid: text::format_grid(puzzle.policy(), puzzle.working())
            .lines()
            .map(str::to_owned)
            .collect(),
    }
}

/// Runs the training simulator and prints its samples.
pub fn run_train(out: &mut impl Write, args: &TrainArgs) -> Result<TrainingRun, RunnerError> {
    let config = TrainingConfig {
        dataset: args.dataset,
        target_steps: args.target_steps,
        ..TrainingConfig::default()
    };
    let run = match args.seed {
        Some(seed) => TrainingRun::new(config, seed)?,
        None => TrainingRun::with_derived_seed(config)?,
    };
    let interval = if args.tick_ms == 0 {
        DEFAULT_TICK_INTERVAL
    } else {
        Duration::from_millis(args.tick_ms)
    };

    let (pacer, clock) = Pacer::new(args.instant);
    let mut sim = TrainingSimulator::new(run, interval, clock);
    let verbose = !args.json;

    if verbose {
        let hyper = &sim.run().config().hyper;
        writeln!(
            out,
            "gridbench {}: training on {} for {} steps (seed {})",
            build_version(),
            args.dataset,
            args.target_steps,
            sim.run().seed()
        )?;
        writeln!(out, "hyper-parameters: {hyper:?}")?;
        writeln!(out, "eta {:?}", sim.eta())?;
        if let Some(seed) = sim.run().latest() {
            print_sample(out, seed)?;
        }
    }

    sim.start();
    let mut ticks = 0;
    while sim.is_running() {
        if args.stop_after_ticks.is_some_and(|limit| ticks >= limit) {
            sim.stop();
            if verbose {
                writeln!(out, "stopped at step {}", sim.run().current_step())?;
            }
            break;
        }
        for sample in sim.update() {
            ticks += 1;
            if verbose {
                print_sample(out, &sample)?;
            }
        }
        if sim.is_running() {
            pacer.wait(interval);
        }
    }

    if verbose {
        let run = sim.run();
        writeln!(
            out,
            "{} samples, step {} of {} ({:.0}%)",
            run.samples().len(),
            run.current_step(),
            run.target_step(),
            run.progress() * 100.0
        )?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &sim.run().summary())?;
        writeln!(out)?;
    }
    Ok(sim.run().clone())
}

fn print_sample(out: &mut impl Write, sample: &TrainingSample) -> io::Result<()> {
    writeln!(
        out,
        "step {:>6}  loss {:.4}  accuracy {:.4}",
        sample.step, sample.loss, sample.accuracy
    )
}
