//! Cell-array virtual machine CLI.
//!
//! This binary is the entry point for the interpreter. It performs:
//! 1. **Run:** Load a packed program image and run it to halt or the
//!    iteration cap; on halt, write the input trace file and report the score.
//! 2. **Replay:** Load an image plus a previously recorded trace and re-inject
//!    every recorded input at its recorded iteration.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use obvm_core::common::constants::CONFIGURATION_CELL;
use obvm_core::sim::trace::{self, TraceFile};
use obvm_core::{Config, Machine, RunOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "obvm",
    version,
    about = "Cell-array virtual machine interpreter",
    long_about = "Run a packed program image to halt or an iteration cap, recording every \
externally injected input; or replay a recorded trace against an image.\n\nExamples:\n  \
obvm run problems/bin1.obf 1001\n  obvm run problems/bin1.obf 1001 --max-iterations 20000 --stats\n  \
obvm replay problems/bin1.obf traces/1001-1.trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image until it halts or the iteration cap is reached.
    Run {
        /// Packed program image to execute.
        image: PathBuf,

        /// Configuration value injected before the first iteration.
        configuration: i32,

        /// JSON configuration file (any subset of fields).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Iteration cap override.
        #[arg(long)]
        max_iterations: Option<u32>,

        /// Trace output directory override.
        #[arg(long)]
        trace_dir: Option<PathBuf>,

        /// Print execution statistics after the run.
        #[arg(long)]
        stats: bool,
    },

    /// Replay a recorded input trace against a program image.
    Replay {
        /// Packed program image to execute.
        image: PathBuf,

        /// Trace file recorded by a previous run.
        trace: PathBuf,

        /// Iteration cap override.
        #[arg(long)]
        max_iterations: Option<u32>,

        /// Print execution statistics after the run.
        #[arg(long)]
        stats: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Run {
            image,
            configuration,
            config,
            max_iterations,
            trace_dir,
            stats,
        } => cmd_run(image, configuration, config, max_iterations, trace_dir, stats),
        Commands::Replay {
            image,
            trace,
            max_iterations,
            stats,
        } => cmd_replay(image, trace, max_iterations, stats),
    }
}

/// Loads the config file (if any) and applies command-line overrides.
fn load_config(
    path: Option<PathBuf>,
    max_iterations: Option<u32>,
    trace_dir: Option<PathBuf>,
) -> Config {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("error: could not read config '{}': {e}", path.display());
                process::exit(1);
            });
            serde_json::from_str(&text).unwrap_or_else(|e| {
                eprintln!("error: invalid config '{}': {e}", path.display());
                process::exit(1);
            })
        }
        None => Config::default(),
    };
    if let Some(cap) = max_iterations {
        config.max_iterations = cap;
    }
    if let Some(dir) = trace_dir {
        config.trace_dir = dir;
    }
    config
}

fn load_machine(image: &PathBuf) -> Machine {
    let mut machine = Machine::new();
    if let Err(e) = machine.load(image) {
        eprintln!("error: could not load image '{}': {e}", image.display());
        process::exit(1);
    }
    machine
}

fn cmd_run(
    image: PathBuf,
    configuration: i32,
    config: Option<PathBuf>,
    max_iterations: Option<u32>,
    trace_dir: Option<PathBuf>,
    stats: bool,
) {
    let config = load_config(config, max_iterations, trace_dir);
    let mut machine = load_machine(&image);

    let outcome = machine
        .run(configuration, config.max_iterations, |_view| {})
        .unwrap_or_else(|e| {
            eprintln!("error: execution fault: {e}");
            process::exit(1);
        });

    match outcome {
        RunOutcome::Halted { iteration, score } => {
            if let Err(e) = fs::create_dir_all(&config.trace_dir) {
                eprintln!(
                    "error: could not create '{}': {e}",
                    config.trace_dir.display()
                );
                process::exit(1);
            }
            let path = config.trace_dir.join(trace::trace_filename(configuration, score));
            if let Err(e) = machine.emit_trace(&path) {
                eprintln!("error: could not write trace '{}': {e}", path.display());
                process::exit(1);
            }
            eprintln!(
                "Configuration {configuration} done after {iteration} iterations, score: {score}"
            );
        }
        RunOutcome::Aborted { iterations_run } => {
            eprintln!("Aborting configuration {configuration} after max {iterations_run} iterations");
        }
    }

    if stats {
        machine.stats().print();
    }
}

fn cmd_replay(image: PathBuf, trace_path: PathBuf, max_iterations: Option<u32>, stats: bool) {
    let trace = TraceFile::read(&trace_path).unwrap_or_else(|e| {
        eprintln!("error: could not read trace '{}': {e}", trace_path.display());
        process::exit(1);
    });
    let mut machine = load_machine(&image);

    let cap = max_iterations.unwrap_or(trace.end_iteration.saturating_add(1));
    let configuration = trace.configuration;
    let frames = trace.frames;
    let mut next = 0usize;

    let outcome = machine
        .run(configuration, cap, |view| {
            let now = view.current_iteration();
            while let Some(frame) = frames.get(next) {
                if frame.iteration != now {
                    break;
                }
                for &(addr, value) in &frame.actions {
                    // The driver injects the configuration itself; replaying
                    // that record would duplicate it in the new trace.
                    if frame.iteration == 0 && addr == CONFIGURATION_CELL {
                        continue;
                    }
                    view.set_input(addr, value);
                }
                next += 1;
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("error: execution fault: {e}");
            process::exit(1);
        });

    match outcome {
        RunOutcome::Halted { iteration, score } => {
            eprintln!(
                "Replay of configuration {configuration} halted after {iteration} iterations, score: {score}"
            );
        }
        RunOutcome::Aborted { iterations_run } => {
            eprintln!("Replay of configuration {configuration} did not halt within {iterations_run} iterations");
        }
    }

    if stats {
        machine.stats().print();
    }
}
