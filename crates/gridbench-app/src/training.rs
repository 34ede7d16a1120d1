//! Timed driver for a [`TrainingRun`].

use std::{rc::Rc, time::Duration};

use gridbench_trainer::{StartOutcome, TickOutcome, TrainingRun, TrainingSample};

use crate::{
    action::{ActionRequestQueue, TrainingAction},
    cancel::CancelFlag,
    clock::Clock,
    flow::{FlowExecutor, tasks},
};

/// Default wall-clock time between two ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Ticks a [`TrainingRun`] at a fixed cadence.
///
/// At most one ticker flow is live per simulator. Every ticker carries a
/// generation number; ticks from a ticker that was stopped or replaced are
/// dropped, so a stop takes effect before the next tick and a restart never
/// doubles the cadence.
#[derive(Debug)]
pub struct TrainingSimulator {
    run: TrainingRun,
    tick_interval: Duration,
    executor: FlowExecutor<TrainingAction>,
    queue: ActionRequestQueue<TrainingAction>,
    generation: u64,
    ticker: Option<CancelFlag>,
}

impl TrainingSimulator {
    #[must_use]
    pub fn new(run: TrainingRun, tick_interval: Duration, clock: Rc<dyn Clock>) -> Self {
        Self {
            run,
            tick_interval,
            executor: FlowExecutor::new(clock),
            queue: ActionRequestQueue::default(),
            generation: 0,
            ticker: None,
        }
    }

    #[must_use]
    pub fn run(&self) -> &TrainingRun {
        &self.run
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    /// Estimated time until the run reaches its target.
    #[must_use]
    pub fn eta(&self) -> Duration {
        self.run.eta(self.tick_interval)
    }

    /// Starts or resumes the run. Idempotent while running.
    pub fn start(&mut self) -> StartOutcome {
        let outcome = self.run.start();
        if outcome.is_started() {
            self.stop_ticker();
            self.generation += 1;
            let cancel = CancelFlag::new();
            tasks::spawn_training_ticker(
                &mut self.executor,
                self.generation,
                self.tick_interval,
                cancel.clone(),
            );
            self.ticker = Some(cancel);
        }
        outcome
    }

    /// Stops the run; samples appended so far are kept.
    pub fn stop(&mut self) -> bool {
        self.stop_ticker();
        self.run.stop()
    }

    /// Stops the run and returns it to its seed sample.
    pub fn reset(&mut self) {
        self.stop_ticker();
        self.run.reset();
    }

    /// Applies due ticks and returns the samples they appended.
    pub fn update(&mut self) -> Vec<TrainingSample> {
        self.executor.poll(&mut self.queue);
        let mut appended = Vec::new();
        for TrainingAction::Tick { generation } in self.queue.take_all() {
            if self.ticker.is_none() || generation != self.generation {
                log::debug!("ignoring tick from stopped ticker {generation}");
                continue;
            }
            match self.run.tick() {
                TickOutcome::Appended(sample) => appended.push(sample),
                TickOutcome::Finished(sample) => {
                    appended.push(sample);
                    self.stop_ticker();
                }
                TickOutcome::Idle => {
                    log::debug!("tick while idle");
                    self.stop_ticker();
                }
            }
        }
        appended
    }

    fn stop_ticker(&mut self) {
        if let Some(cancel) = self.ticker.take() {
            cancel.cancel();
        }
    }
}
