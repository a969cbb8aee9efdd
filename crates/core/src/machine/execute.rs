//! Instruction execution engines.
//!
//! This module implements the per-iteration sweep and the two instruction
//! families. One sweep visits every cell address in increasing order, decodes
//! its program word, and dispatches it; the machine emulates a synchronous
//! circuit in which every cell updates once per "clock", not a sequential
//! fetch-decode-execute loop with branching. Instructions observe the current
//! sweep's partially-updated data array: later cells read values earlier
//! cells just wrote. That ordering is part of the ISA and must match address
//! order exactly.

use tracing::trace;

use crate::common::constants::MEMORY_CELLS;
use crate::common::error::ExecutionError;
use crate::isa::decode::{Comparator, Decoded, decode};
use crate::machine::Machine;

/// Single-operand operation codes (nested opcode space under opcode 0).
mod s_ops {
    pub const NOOP: u32 = 0;
    pub const CMPZ: u32 = 1;
    pub const SQRT: u32 = 2;
    pub const COPY: u32 = 3;
    pub const INPUT: u32 = 4;
}

/// Double-operand operation codes.
mod d_ops {
    pub const ADD: u32 = 1;
    pub const SUB: u32 = 2;
    pub const MULT: u32 = 3;
    pub const DIV: u32 = 4;
    pub const OUTPUT: u32 = 5;
    pub const PHI: u32 = 6;
}

impl Machine {
    /// Runs one full sweep over all cell addresses in increasing order.
    ///
    /// Any execution error is fatal to the run: the instruction set offers no
    /// exception-handling primitives, so a malformed image cannot be executed
    /// partially.
    pub(crate) fn sweep(&mut self) -> Result<(), ExecutionError> {
        for pc in 0..MEMORY_CELLS {
            let word = self.bank.program(pc);
            // An all-zero word is a no-op with operand 0; most of a typical
            // image is empty, so skip the dispatch.
            if word == 0 {
                continue;
            }
            self.execute(pc, decode(word))?;
        }
        self.stats.sweeps += 1;
        Ok(())
    }

    /// Executes one decoded instruction at cell `pc`.
    ///
    /// Every address field is validated against the cell range before any
    /// array is touched, so a faulting instruction leaves no partial
    /// mutation behind.
    pub fn execute(&mut self, pc: usize, inst: Decoded) -> Result<(), ExecutionError> {
        trace!(pc, %inst, "execute");
        match inst {
            Decoded::Single { op, immediate, addr } => {
                self.exec_single(pc, op, immediate, addr, inst)
            }
            Decoded::Double { op, addr1, addr2 } => self.exec_double(pc, op, addr1, addr2, inst),
        }
    }

    /// Single-operand family: no-op, compare-to-zero, square root, copy, and
    /// input load.
    fn exec_single(
        &mut self,
        pc: usize,
        op: u32,
        immediate: u32,
        addr: usize,
        inst: Decoded,
    ) -> Result<(), ExecutionError> {
        if addr >= MEMORY_CELLS {
            return Err(ExecutionError::AddressOutOfBounds { pc, inst });
        }

        match op {
            s_ops::NOOP => {}
            s_ops::CMPZ => {
                let code = Comparator::code_of(immediate);
                let comparator = Comparator::from_code(code)
                    .ok_or(ExecutionError::BadComparator { pc, code, inst })?;
                self.status = comparator.eval(self.bank.data(addr));
            }
            // No domain clamping: a negative operand yields NaN, which
            // propagates forward like any other float.
            s_ops::SQRT => self.bank.set_data(pc, self.bank.data(addr).sqrt()),
            s_ops::COPY => self.bank.set_data(pc, self.bank.data(addr)),
            s_ops::INPUT => self.bank.set_data(pc, self.bank.input(addr)),
            _ => return Err(ExecutionError::BadOpcode { pc, inst }),
        }

        self.stats.single_ops += 1;
        Ok(())
    }

    /// Double-operand family: arithmetic, output publish, and status-driven
    /// select.
    fn exec_double(
        &mut self,
        pc: usize,
        op: u32,
        addr1: usize,
        addr2: usize,
        inst: Decoded,
    ) -> Result<(), ExecutionError> {
        if addr1 >= MEMORY_CELLS || addr2 >= MEMORY_CELLS {
            return Err(ExecutionError::AddressOutOfBounds { pc, inst });
        }

        match op {
            d_ops::ADD => {
                let value = self.bank.data(addr1) + self.bank.data(addr2);
                self.bank.set_data(pc, value);
            }
            d_ops::SUB => {
                let value = self.bank.data(addr1) - self.bank.data(addr2);
                self.bank.set_data(pc, value);
            }
            d_ops::MULT => {
                let value = self.bank.data(addr1) * self.bank.data(addr2);
                self.bank.set_data(pc, value);
            }
            d_ops::DIV => {
                // Division by exact zero saturates to zero. This is ISA
                // semantics, not error recovery.
                let divisor = self.bank.data(addr2);
                let value = if divisor == 0.0 {
                    0.0
                } else {
                    self.bank.data(addr1) / divisor
                };
                self.bank.set_data(pc, value);
            }
            d_ops::OUTPUT => {
                let value = self.bank.data(addr2);
                self.bank.set_output(addr1, value);
                self.stats.outputs_published += 1;
            }
            d_ops::PHI => {
                let src = if self.status { addr1 } else { addr2 };
                self.bank.set_data(pc, self.bank.data(src));
            }
            _ => return Err(ExecutionError::BadOpcode { pc, inst }),
        }

        self.stats.double_ops += 1;
        Ok(())
    }
}
