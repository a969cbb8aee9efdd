//! Simulation orchestration.
//!
//! This module contains everything around the execution engines:
//! 1. **Loader:** Reads a packed binary program image into the memory bank.
//! 2. **Driver:** Runs bounded iterations with halt detection and yields to
//!    an external step callback between sweeps.
//! 3. **Trace:** Records externally-injected inputs and serializes them to
//!    the binary trace format (and reads them back for replay).

/// Iteration driver, run outcomes, and the step callback handle.
pub mod driver;

/// Packed binary program image loader.
pub mod loader;

/// Input trace recording, serialization, and parsing.
pub mod trace;

pub use driver::{RunOutcome, StepView};
pub use trace::{InputAction, TraceFile, TraceFrame};
