//! Machine state and execution.
//!
//! This module defines the interpreter's architectural state and the engines
//! that mutate it. It provides:
//! 1. **Memory Bank:** The four parallel arrays (data, program, input,
//!    output) over the uniform cell address space.
//! 2. **Status Flag:** The single boolean register written by compare and
//!    read by select, persistent across sweeps.
//! 3. **Execution Engines:** Dispatch for the single-operand and
//!    double-operand instruction families.

/// The four parallel memory arrays.
pub mod bank;

/// Instruction execution engines and the per-iteration sweep.
pub mod execute;

use crate::machine::bank::MemoryBank;
use crate::sim::trace::TraceLog;
use crate::stats::RunStats;

/// The cell-array virtual machine.
///
/// Owns all run state: the memory bank, the status flag, the current
/// iteration counter, the run configuration, the input trace log, and
/// execution statistics. All external access goes through the accessor
/// methods here; nothing else may touch the arrays.
#[derive(Debug)]
pub struct Machine {
    pub(crate) bank: MemoryBank,
    /// Persistent comparison result; written only by compare, read only by
    /// select. Deliberately not reset between sweeps or runs.
    pub(crate) status: bool,
    pub(crate) iteration: u32,
    pub(crate) configuration: i32,
    pub(crate) trace: TraceLog,
    pub(crate) stats: RunStats,
}

impl Machine {
    /// Creates a machine with a zero-initialized memory bank.
    pub fn new() -> Self {
        Self {
            bank: MemoryBank::new(),
            status: false,
            iteration: 0,
            configuration: 0,
            trace: TraceLog::new(),
            stats: RunStats::new(),
        }
    }

    /// Returns the iteration the driver is currently executing.
    pub fn current_iteration(&self) -> u32 {
        self.iteration
    }

    /// Returns the configuration value of the current run.
    pub fn configuration(&self) -> i32 {
        self.configuration
    }

    /// Reads an output cell.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is outside the machine's address space.
    pub fn get_output(&self, addr: usize) -> f64 {
        self.bank.output(addr)
    }

    /// Reads a data cell. Intended for observers (visualization, debugging);
    /// programs communicate results through the output array.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is outside the machine's address space.
    pub fn get_data(&self, addr: usize) -> f64 {
        self.bank.data(addr)
    }

    /// Reads the packed instruction word at a cell. Intended for observers
    /// and image inspection; execution decodes straight from the bank.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is outside the machine's address space.
    pub fn get_program(&self, addr: usize) -> u64 {
        self.bank.program(addr)
    }

    /// Writes an input cell and records the injection in the trace log,
    /// timestamped with the current iteration.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is outside the machine's address space.
    pub fn set_input(&mut self, addr: usize, value: f64) {
        self.bank.set_input(addr, value);
        self.trace.record(self.iteration, addr, value);
        self.stats.inputs_injected += 1;
    }

    /// Returns the current value of the status flag.
    pub fn status(&self) -> bool {
        self.status
    }

    /// Returns the statistics accumulated so far.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
