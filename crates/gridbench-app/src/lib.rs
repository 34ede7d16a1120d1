//! Solve playback and training simulation for the gridbench workbench.
//!
//! Everything timed in this crate runs on a [`flow::FlowExecutor`] polled
//! from an owner's `update()` against a [`clock::Clock`]. Production code
//! uses [`clock::SystemClock`]; tests and `--instant` runs use
//! [`clock::VirtualClock`] and step time by hand.
//!
//! - [`workbench::Workbench`] owns one puzzle, its edit history and its
//!   [`session::SolveSession`], and plays results back through
//!   [`reveal::RevealAnimator`].
//! - [`training::TrainingSimulator`] ticks a
//!   [`TrainingRun`](gridbench_trainer::TrainingRun).
//! - [`model_loader::ModelLoader`] reports the simulated model status.
//! - [`runner`] is the terminal front end used by the `gridbench` binary.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 200;

pub mod action;
pub mod cancel;
pub mod clock;
pub mod flow;
mod flow_executor;
pub mod history;
pub mod model_loader;
pub mod reveal;
pub mod runner;
pub mod session;
pub mod settings;
pub mod training;
pub mod version;
pub mod workbench;
