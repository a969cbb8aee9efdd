//! Configuration for the interpreter.
//!
//! This module defines the run parameters that are not part of a program
//! image. It provides:
//! 1. **Defaults:** Baseline values used when nothing is overridden.
//! 2. **Structures:** A serde-deserializable config consumed by the CLI,
//!    typically from a JSON file.

use std::path::PathBuf;

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Iteration cap when the caller does not supply one.
    ///
    /// Generous enough for long-running programs while still bounding a run
    /// whose halt output never fires.
    pub const MAX_ITERATIONS: u32 = 1_000_000;

    /// Directory trace files are written into on halt.
    pub const TRACE_DIR: &str = "traces";
}

/// Run configuration.
///
/// All fields have defaults; deserialize from JSON with any subset present,
/// or use [`Config::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum number of iterations before a run is aborted.
    pub max_iterations: u32,
    /// Directory where halt traces are written.
    pub trace_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: defaults::MAX_ITERATIONS,
            trace_dir: PathBuf::from(defaults::TRACE_DIR),
        }
    }
}
