//! Synthetic training-loop simulator.
//!
//! A [`TrainingRun`] produces a plausible, on-average improving series of
//! [`TrainingSample`]s without doing any real computation. It is a stepped
//! state machine: the caller decides when a tick happens, and each
//! [`TrainingRun::tick`] appends exactly one sample while the run is
//! running. This keeps the simulator deterministic and lets it be driven by
//! a real timer or a virtual clock alike.
//!
//! Noise comes from a [`RunSeed`]; identical configurations replay identical
//! curves.
//!
//! # Examples
//!
//! ```
//! use gridbench_trainer::{TickOutcome, TrainingConfig, TrainingRun};
//!
//! let config = TrainingConfig {
//!     target_steps: 30,
//!     ..TrainingConfig::default()
//! };
//! let mut run = TrainingRun::with_derived_seed(config)?;
//! run.start();
//! while !run.tick().is_idle() {}
//!
//! assert_eq!(run.current_step(), 30);
//! assert!(!run.is_running());
//! assert_eq!(run.samples().len(), 4);
//! # Ok::<(), gridbench_trainer::TrainingConfigError>(())
//! ```

pub use self::{config::*, curve::*, run::*, seed::*};

mod config;
mod curve;
mod run;
mod seed;
