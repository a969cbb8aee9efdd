//! Run statistics collection and reporting.
//!
//! This module tracks execution counters for one run. It provides:
//! 1. **Sweep counts:** Iterations actually executed.
//! 2. **Instruction mix:** Counts by instruction family and published outputs.
//! 3. **External activity:** Inputs injected through the callback surface.
//! 4. **Wall time:** Elapsed host time since the run started.

use std::time::Instant;

/// Execution counters for one run.
///
/// Reset at the start of every [`crate::Machine::run`] call.
#[derive(Debug, Clone)]
pub struct RunStats {
    start_time: Instant,
    /// Full sweeps over the cell array completed.
    pub sweeps: u64,
    /// Single-operand instructions executed (including explicit no-ops).
    pub single_ops: u64,
    /// Double-operand instructions executed.
    pub double_ops: u64,
    /// Output-publish instructions executed.
    pub outputs_published: u64,
    /// Inputs injected via the external callback surface.
    pub inputs_injected: u64,
}

impl RunStats {
    /// Creates zeroed statistics with the clock started now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            sweeps: 0,
            single_ops: 0,
            double_ops: 0,
            outputs_published: 0,
            inputs_injected: 0,
        }
    }

    /// Seconds of host wall time since the run started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Prints a human-readable report to stdout.
    pub fn print(&self) {
        let executed = self.single_ops + self.double_ops;
        let elapsed = self.elapsed_secs();
        println!("--- Run Statistics ---");
        println!("  Sweeps:            {}", self.sweeps);
        println!("  Instructions:      {executed}");
        println!("    single-operand:  {}", self.single_ops);
        println!("    double-operand:  {}", self.double_ops);
        println!("  Outputs published: {}", self.outputs_published);
        println!("  Inputs injected:   {}", self.inputs_injected);
        println!("  Elapsed:           {elapsed:.3}s");
        if elapsed > 0.0 {
            let mips = executed as f64 / elapsed / 1.0e6;
            println!("  Throughput:        {mips:.2} M inst/s");
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
