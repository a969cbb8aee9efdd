//! Load and execution failure definitions.
//!
//! This module defines the error taxonomy for the interpreter. It provides:
//! 1. **Load Errors:** Failures while reading a packed program image.
//! 2. **Execution Errors:** Malformed instructions encountered mid-sweep,
//!    carrying the full decoded word so the fault can be reproduced.
//!
//! Both kinds are unrecoverable for the current run: the instruction set has
//! no exception-handling primitives, so a malformed image cannot be executed
//! partially. Terminal run outcomes (halt, abort) are not errors and live in
//! [`crate::sim::driver::RunOutcome`].

use thiserror::Error;

use crate::common::constants::MEMORY_CELLS;
use crate::isa::decode::Decoded;

/// Errors raised while loading a packed program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image contains more frames than the machine has cells.
    #[error("program image exceeds {MEMORY_CELLS} frames")]
    TooManyFrames,

    /// An underlying read of the image file failed.
    #[error("failed to read program image: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while executing a decoded instruction.
///
/// Each variant carries the cell address being executed and the decoded
/// instruction, which together reproduce the faulting dispatch exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The opcode (or single-operand sub-opcode) names no operation.
    #[error("bad opcode at cell {pc:#06x}: {inst}")]
    BadOpcode {
        /// Cell address whose program slot held the instruction.
        pc: usize,
        /// The decoded instruction fields.
        inst: Decoded,
    },

    /// A compare instruction carried a comparator code outside the table.
    #[error("bad comparator code {code} at cell {pc:#06x}: {inst}")]
    BadComparator {
        /// Cell address whose program slot held the instruction.
        pc: usize,
        /// The out-of-table 3-bit comparator code.
        code: u32,
        /// The decoded instruction fields.
        inst: Decoded,
    },

    /// An address field fell outside the machine's cell range.
    #[error("address out of bounds at cell {pc:#06x}: {inst}")]
    AddressOutOfBounds {
        /// Cell address whose program slot held the instruction.
        pc: usize,
        /// The decoded instruction fields.
        inst: Decoded,
    },
}
