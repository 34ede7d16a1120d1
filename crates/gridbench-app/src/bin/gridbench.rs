//! Gridbench command-line entry point.
//!
//! ```sh
//! gridbench sample path
//! gridbench solve constraint --speed 4
//! gridbench solve path --input maze.txt --instant
//! gridbench train --dataset maze --target-steps 300 --json
//! ```

use std::{io, process};

use clap::{Parser, Subcommand};
use gridbench_app::runner::{self, SampleArgs, SolveArgs, TrainArgs};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a domain's sample puzzle.
    Sample(SampleArgs),
    /// Solve a puzzle with the stand-in model and play back the reveal.
    Solve(SolveArgs),
    /// Run the synthetic training simulator.
    Train(TrainArgs),
}

fn main() {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();
    let result = match &cli.command {
        Command::Sample(args) => runner::run_sample(&mut out, args),
        Command::Solve(args) => runner::run_solve(&mut out, args).map(|_| ()),
        Command::Train(args) => runner::run_train(&mut out, args).map(|_| ()),
    };
    if let Err(err) = result {
        log::error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}
