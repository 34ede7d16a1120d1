use std::time::Duration;

use rand::{
    SeedableRng as _,
    distr::{Distribution as _, Uniform},
};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::{DatasetKind, RunSeed, TrainingConfig, TrainingConfigError};

/// One point of the synthetic curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Training step.
    pub step: u32,
    /// Loss, never below the configured floor.
    pub loss: f64,
    /// Accuracy in `[0, 1]`.
    pub accuracy: f64,
}

/// Result of [`TrainingRun::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StartOutcome {
    /// The run is now running (from step 0 or where it was stopped).
    Started,
    /// The run was already running; nothing changed.
    AlreadyRunning,
    /// The run already reached its target; reset it first.
    AlreadyComplete,
}

/// Result of [`TrainingRun::tick`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// A sample was appended and the run keeps going.
    Appended(TrainingSample),
    /// The final sample was appended and the run stopped.
    Finished(TrainingSample),
    /// The run is not running; nothing was appended.
    Idle,
}

/// Serializable snapshot of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Dataset being "trained" on.
    pub dataset: DatasetKind,
    /// Noise seed.
    pub seed: RunSeed,
    /// Step reached.
    pub current_step: u32,
    /// Step at which the run stops by itself.
    pub target_step: u32,
    /// Whether the run is still running.
    pub running: bool,
    /// All samples, in step order.
    pub samples: Vec<TrainingSample>,
}

/// A synthetic training run.
///
/// The run starts with a noiseless sample at step 0. While running, every
/// [`tick`](Self::tick) advances by the configured step increment and
/// appends one sample; the tick that reaches the target clamps to it,
/// appends, and stops the run. Samples are never removed except by
/// [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct TrainingRun {
    config: TrainingConfig,
    seed: RunSeed,
    rng: Pcg64,
    loss_noise: Uniform<f64>,
    accuracy_noise: Uniform<f64>,
    samples: Vec<TrainingSample>,
    current_step: u32,
    running: bool,
}

impl TrainingRun {
    /// Creates a stopped run at step 0.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`TrainingConfig::validate`].
    pub fn new(config: TrainingConfig, seed: RunSeed) -> Result<Self, TrainingConfigError> {
        config.validate()?;
        let curve = &config.curve;
        let loss_noise = symmetric_noise("loss_noise", curve.loss_noise)?;
        let accuracy_noise = symmetric_noise("accuracy_noise", curve.accuracy_noise)?;

        let mut run = Self {
            config,
            seed,
            rng: Pcg64::from_seed(*seed.as_bytes()),
            loss_noise,
            accuracy_noise,
            samples: Vec::new(),
            current_step: 0,
            running: false,
        };
        run.reset();
        Ok(run)
    }

    /// Creates a stopped run seeded from the configuration itself.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`TrainingConfig::validate`].
    pub fn with_derived_seed(config: TrainingConfig) -> Result<Self, TrainingConfigError> {
        Self::new(config, RunSeed::derive(&config))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Returns the noise seed.
    #[must_use]
    pub fn seed(&self) -> RunSeed {
        self.seed
    }

    /// Returns every sample so far, ordered by strictly increasing step.
    #[must_use]
    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }

    /// Returns the most recent sample.
    #[must_use]
    pub fn latest(&self) -> Option<&TrainingSample> {
        self.samples.last()
    }

    /// Returns the step reached so far.
    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Returns the step at which the run stops by itself.
    #[must_use]
    pub fn target_step(&self) -> u32 {
        self.config.target_steps
    }

    /// Returns `true` while ticks append samples.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns `true` once the target step has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_step >= self.config.target_steps
    }

    /// Returns the fraction of the target reached, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        f64::from(self.current_step) / f64::from(self.config.target_steps)
    }

    /// Returns the number of ticks left before the run stops by itself.
    #[must_use]
    pub fn remaining_ticks(&self) -> u32 {
        (self.config.target_steps - self.current_step).div_ceil(self.config.steps_per_tick)
    }

    /// Returns the time left before the run stops by itself, given the
    /// interval between ticks. Saturates at [`Duration::MAX`].
    #[must_use]
    pub fn eta(&self, tick_interval: Duration) -> Duration {
        tick_interval
            .checked_mul(self.remaining_ticks())
            .unwrap_or(Duration::MAX)
    }

    /// Starts or resumes the run.
    ///
    /// Starting a running run is a no-op, and a completed run stays
    /// stopped until it is reset.
    pub fn start(&mut self) -> StartOutcome {
        if self.running {
            return StartOutcome::AlreadyRunning;
        }
        if self.is_complete() {
            return StartOutcome::AlreadyComplete;
        }
        self.running = true;
        log::info!(
            "training on {} started at step {} of {}",
            self.config.dataset,
            self.current_step,
            self.config.target_steps
        );
        StartOutcome::Started
    }

    /// Stops the run. Already appended samples are kept.
    ///
    /// Returns `true` if the run was running.
    pub fn stop(&mut self) -> bool {
        let was_running = std::mem::replace(&mut self.running, false);
        if was_running {
            log::info!("training stopped at step {}", self.current_step);
        }
        was_running
    }

    /// Advances the run by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        let step = self
            .current_step
            .saturating_add(self.config.steps_per_tick)
            .min(self.config.target_steps);
        let curve = &self.config.curve;
        let sample = TrainingSample {
            step,
            loss: curve.loss_at(step, self.loss_noise.sample(&mut self.rng)),
            accuracy: curve.accuracy_at(step, self.accuracy_noise.sample(&mut self.rng)),
        };
        log::trace!(
            "step {}: loss {:.3}, accuracy {:.3}",
            sample.step,
            sample.loss,
            sample.accuracy
        );
        self.samples.push(sample);
        self.current_step = step;

        if self.is_complete() {
            self.running = false;
            log::info!("training finished at step {step}");
            TickOutcome::Finished(sample)
        } else {
            TickOutcome::Appended(sample)
        }
    }

    /// Stops the run and returns it to the seed sample at step 0.
    ///
    /// The noise generator is reseeded, so the run replays the same curve.
    pub fn reset(&mut self) {
        let curve = &self.config.curve;
        self.rng = Pcg64::from_seed(*self.seed.as_bytes());
        self.samples = vec![TrainingSample {
            step: 0,
            loss: curve.loss_at(0, 0.0),
            accuracy: curve.accuracy_at(0, 0.0),
        }];
        self.current_step = 0;
        self.running = false;
    }

    /// Returns a serializable snapshot of the run.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            dataset: self.config.dataset,
            seed: self.seed,
            current_step: self.current_step,
            target_step: self.config.target_steps,
            running: self.running,
            samples: self.samples.clone(),
        }
    }
}

fn symmetric_noise(name: &'static str, amplitude: f64) -> Result<Uniform<f64>, TrainingConfigError> {
    Uniform::new_inclusive(-amplitude, amplitude)
        .map_err(|_| TrainingConfigError::InvalidNoise {
            name,
            value: amplitude,
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn run_with(target_steps: u32, steps_per_tick: u32) -> TrainingRun {
        let config = TrainingConfig {
            target_steps,
            steps_per_tick,
            ..TrainingConfig::default()
        };
        TrainingRun::with_derived_seed(config).unwrap()
    }

    fn run_to_end(run: &mut TrainingRun) -> usize {
        let mut ticks = 0;
        while !run.tick().is_idle() {
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_new_run_has_seed_sample() {
        let run = run_with(1000, 10);
        assert_eq!(run.samples().len(), 1);
        let seed = run.latest().unwrap();
        assert_eq!(seed.step, 0);
        assert!((seed.loss - 2.5).abs() < f64::EPSILON);
        assert!(!run.is_running());
        assert_eq!(run.remaining_ticks(), 100);
        assert_eq!(run.eta(Duration::from_millis(100)), Duration::from_secs(10));
    }

    #[test]
    fn test_eta_saturates_for_huge_intervals() {
        let run = run_with(u32::MAX, 1);
        assert_eq!(run.eta(Duration::from_millis(u64::MAX)), Duration::MAX);
        assert_eq!(run.eta(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_tick_is_idle_until_started() {
        let mut run = run_with(1000, 10);
        assert_eq!(run.tick(), TickOutcome::Idle);
        assert_eq!(run.samples().len(), 1);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut run = run_with(1000, 10);
        assert_eq!(run.start(), StartOutcome::Started);
        assert_eq!(run.start(), StartOutcome::AlreadyRunning);
        assert!(run.tick().is_appended());
        assert_eq!(run.samples().len(), 2);
    }

    #[test]
    fn test_run_stops_exactly_at_target() {
        let mut run = run_with(1000, 10);
        run.start();
        assert_eq!(run_to_end(&mut run), 100);

        assert!(!run.is_running());
        assert_eq!(run.current_step(), run.target_step());
        assert_eq!(run.samples().len(), 101);
        assert!((run.progress() - 1.0).abs() < f64::EPSILON);
        assert_eq!(run.start(), StartOutcome::AlreadyComplete);
    }

    #[test]
    fn test_final_tick_clamps_to_target() {
        let mut run = run_with(25, 10);
        run.start();
        assert!(run.tick().is_appended());
        assert!(run.tick().is_appended());
        let TickOutcome::Finished(last) = run.tick() else {
            panic!("third tick must finish the run");
        };
        assert_eq!(last.step, 25);
        let steps: Vec<_> = run.samples().iter().map(|s| s.step).collect();
        assert_eq!(steps, [0, 10, 20, 25]);
    }

    #[test]
    fn test_stop_keeps_samples_and_resume_continues() {
        let mut run = run_with(1000, 10);
        run.start();
        run.tick();
        run.tick();
        assert!(run.stop());
        assert!(!run.stop());
        assert_eq!(run.tick(), TickOutcome::Idle);
        assert_eq!(run.samples().len(), 3);

        assert_eq!(run.start(), StartOutcome::Started);
        let TickOutcome::Appended(sample) = run.tick() else {
            panic!("resumed run must append");
        };
        assert_eq!(sample.step, 30);
    }

    #[test]
    fn test_same_seed_replays_same_curve() {
        let mut first = run_with(200, 10);
        first.start();
        run_to_end(&mut first);
        let recorded = first.samples().to_vec();

        first.reset();
        assert_eq!(first.samples().len(), 1);
        first.start();
        run_to_end(&mut first);
        assert_eq!(first.samples(), recorded.as_slice());

        let mut second = run_with(200, 10);
        second.start();
        run_to_end(&mut second);
        assert_eq!(second.samples(), recorded.as_slice());
    }

    #[test]
    fn test_summary_serializes() {
        let mut run = run_with(20, 10);
        run.start();
        run_to_end(&mut run);
        let json = serde_json::to_value(run.summary()).unwrap();
        assert_eq!(json["dataset"], "sudoku");
        assert_eq!(json["current_step"], 20);
        assert_eq!(json["samples"].as_array().unwrap().len(), 3);
    }

    proptest! {
        #[test]
        fn prop_samples_are_well_formed(
            target in 1u32..400,
            increment in 1u32..50,
            seed in any::<[u8; 32]>(),
        ) {
            let config = TrainingConfig {
                target_steps: target,
                steps_per_tick: increment,
                ..TrainingConfig::default()
            };
            let mut run = TrainingRun::new(config, RunSeed::from_bytes(seed)).unwrap();
            run.start();
            while run.is_running() {
                prop_assert!(run.current_step() < run.target_step());
                run.tick();
            }

            prop_assert_eq!(run.current_step(), target);
            prop_assert!(run.samples().windows(2).all(|w| w[0].step < w[1].step));
            for sample in run.samples() {
                prop_assert!(sample.loss >= 0.0);
                prop_assert!((0.0..=1.0).contains(&sample.accuracy));
                prop_assert!(sample.step <= target);
            }
        }
    }
}
