//! Cell-array virtual machine interpreter library.
//!
//! This crate implements a deterministic interpreter for a fixed-size,
//! combinationally-executed virtual machine with the following:
//! 1. **Machine:** The 16385-cell memory bank (data, program, input, output),
//!    the status flag, and the two instruction execution engines.
//! 2. **ISA:** Bit-field extraction and decoding for the packed 32-bit
//!    instruction word (single-operand and double-operand families).
//! 3. **Simulation:** Binary image loader, iteration driver with halt
//!    detection and step callback, and the input trace recorder/reader.
//! 4. **Configuration:** Run parameters (iteration cap, trace directory)
//!    with serde deserialization.
//! 5. **Statistics:** Per-run execution counters and reporting.

/// Common constants and error types (cell addresses, field masks, failures).
pub mod common;
/// Run configuration (defaults, serde structures).
pub mod config;
/// Instruction set (word field extraction, decoding, comparators).
pub mod isa;
/// Machine state (memory bank, status flag, execution engines).
pub mod machine;
/// Simulation (image loader, iteration driver, input trace).
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main interpreter type; owns the memory bank, status flag, and trace log.
pub use crate::machine::Machine;
/// Terminal outcome of a run (halt with score, or abort at the cap).
pub use crate::sim::driver::RunOutcome;
