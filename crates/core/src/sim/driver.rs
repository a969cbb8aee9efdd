//! Iteration driver.
//!
//! One run is a bounded sequence of sweeps with a strict two-phase protocol
//! per iteration: execute the sweep to completion, then yield control
//! synchronously to the caller's step callback through a narrow handle. The
//! callback may inspect outputs and inject the next iteration's inputs; it
//! never overlaps a sweep, so the memory bank is always internally consistent
//! when external code observes it. No threads, no locks: there is exactly one
//! writer and the callback runs at the defined suspension point.

use tracing::debug;

use crate::common::constants::{CONFIGURATION_CELL, HALT_CELL};
use crate::common::error::ExecutionError;
use crate::machine::Machine;
use crate::stats::RunStats;

/// Terminal outcome of a run. Neither variant is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// The program signalled completion by writing a non-zero value to the
    /// halt output cell.
    Halted {
        /// Iteration during which the halt output became non-zero.
        iteration: u32,
        /// The halt output's value, the program-defined score of the run.
        score: f64,
    },
    /// The iteration cap was exhausted without the program halting.
    Aborted {
        /// Number of iterations executed (the cap).
        iterations_run: u32,
    },
}

/// Capability handle passed to the step callback between sweeps.
///
/// Exposes only the interpreter surface an external control strategy needs:
/// reading outputs, the current iteration, and injecting inputs. Injections
/// are recorded in the machine's input trace.
#[derive(Debug)]
pub struct StepView<'a> {
    machine: &'a mut Machine,
}

impl StepView<'_> {
    /// Reads an output cell.
    pub fn get_output(&self, addr: usize) -> f64 {
        self.machine.get_output(addr)
    }

    /// Returns the iteration whose sweep just completed.
    pub fn current_iteration(&self) -> u32 {
        self.machine.current_iteration()
    }

    /// Writes an input cell for the next iteration and records the injection.
    pub fn set_input(&mut self, addr: usize, value: f64) {
        self.machine.set_input(addr, value);
    }
}

impl Machine {
    /// Runs the loaded program until it halts or the iteration cap is hit.
    ///
    /// The input and output arrays are zeroed, the configuration value is
    /// injected into its fixed input cell, and then each iteration sweeps
    /// every cell in address order. After each sweep the halt output is
    /// polled; a non-zero value ends the run with that score. Otherwise
    /// `on_step` is invoked with a [`StepView`] so the caller can inject the
    /// next iteration's inputs. A previous run's trace records are discarded
    /// at the start; the configuration injection itself is the new trace's
    /// first record.
    ///
    /// # Errors
    ///
    /// Any [`ExecutionError`] raised during a sweep aborts the run
    /// immediately; there is no partial recovery.
    pub fn run<F>(
        &mut self,
        configuration: i32,
        max_iterations: u32,
        mut on_step: F,
    ) -> Result<RunOutcome, ExecutionError>
    where
        F: FnMut(&mut StepView<'_>),
    {
        self.configuration = configuration;
        self.iteration = 0;
        self.trace.clear();
        self.stats = RunStats::new();
        self.bank.clear_io();
        self.set_input(CONFIGURATION_CELL, f64::from(configuration));

        debug!(configuration, max_iterations, "starting run");

        for iteration in 0..max_iterations {
            self.iteration = iteration;
            self.sweep()?;

            let score = self.get_output(HALT_CELL);
            if score != 0.0 {
                debug!(iteration, score, "halted");
                return Ok(RunOutcome::Halted { iteration, score });
            }

            on_step(&mut StepView { machine: self });
        }

        debug!(iterations = max_iterations, "iteration cap reached");
        Ok(RunOutcome::Aborted {
            iterations_run: max_iterations,
        })
    }
}
