//! Memory bank implementation.
//!
//! This module provides the [`MemoryBank`], the four parallel fixed-length
//! arrays making up the machine's uniform address space. One cell address
//! simultaneously names a data slot, a program slot, an input slot, and an
//! output slot; the arrays are independent, not a union. The bank is owned
//! exclusively by one [`crate::Machine`] and never escapes it.

use crate::common::constants::MEMORY_CELLS;

/// The machine's four parallel memory arrays.
///
/// All arrays have length [`MEMORY_CELLS`] and are zero-initialized at
/// construction. Accessors index directly and panic on an out-of-range
/// address; the execution engines validate every decoded address field
/// before touching the bank, so a panic here indicates a caller bug, not a
/// malformed program.
#[derive(Debug)]
pub struct MemoryBank {
    data: Box<[f64]>,
    program: Box<[u64]>,
    input: Box<[f64]>,
    output: Box<[f64]>,
}

impl MemoryBank {
    /// Creates a zero-initialized bank.
    pub fn new() -> Self {
        Self {
            data: vec![0.0; MEMORY_CELLS].into_boxed_slice(),
            program: vec![0; MEMORY_CELLS].into_boxed_slice(),
            input: vec![0.0; MEMORY_CELLS].into_boxed_slice(),
            output: vec![0.0; MEMORY_CELLS].into_boxed_slice(),
        }
    }

    /// Reads the data word at `addr`.
    #[inline(always)]
    pub fn data(&self, addr: usize) -> f64 {
        self.data[addr]
    }

    /// Writes the data word at `addr`.
    #[inline(always)]
    pub fn set_data(&mut self, addr: usize, value: f64) {
        self.data[addr] = value;
    }

    /// Reads the packed instruction word at `addr`.
    #[inline(always)]
    pub fn program(&self, addr: usize) -> u64 {
        self.program[addr]
    }

    /// Writes the packed instruction word at `addr`.
    #[inline(always)]
    pub fn set_program(&mut self, addr: usize, word: u64) {
        self.program[addr] = word;
    }

    /// Reads the externally-writable input slot at `addr`.
    #[inline(always)]
    pub fn input(&self, addr: usize) -> f64 {
        self.input[addr]
    }

    /// Writes the externally-writable input slot at `addr`.
    #[inline(always)]
    pub fn set_input(&mut self, addr: usize, value: f64) {
        self.input[addr] = value;
    }

    /// Reads the externally-readable output slot at `addr`.
    #[inline(always)]
    pub fn output(&self, addr: usize) -> f64 {
        self.output[addr]
    }

    /// Writes the externally-readable output slot at `addr`.
    #[inline(always)]
    pub fn set_output(&mut self, addr: usize, value: f64) {
        self.output[addr] = value;
    }

    /// Zeroes the data and program arrays ahead of an image load, so a short
    /// image leaves trailing cells at zero.
    pub fn clear_image(&mut self) {
        self.data.fill(0.0);
        self.program.fill(0);
    }

    /// Zeroes the input and output arrays ahead of a run.
    pub fn clear_io(&mut self) {
        self.input.fill(0.0);
        self.output.fill(0.0);
    }
}

impl Default for MemoryBank {
    fn default() -> Self {
        Self::new()
    }
}
