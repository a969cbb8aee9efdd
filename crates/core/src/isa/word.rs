//! Instruction word field extraction.
//!
//! Provides bit extraction for the packed instruction word. Words are stored
//! widened to `u64` in the program array but only the low 32 bits carry
//! meaning; extraction masks off anything above them. The word is the single
//! source of truth: fields are re-extracted on every use, never decoded once
//! and cached.

use crate::common::constants::{
    ADDR_MASK, ADDR1_SHIFT, IMMEDIATE_MASK, IMMEDIATE_SHIFT, OPCODE_MASK, OPCODE_SHIFT,
    SUB_OPCODE_MASK, SUB_OPCODE_SHIFT,
};

/// Trait for extracting instruction fields from a packed word.
///
/// Field positions overlap between the two instruction families: the
/// double-operand `addr1` occupies the same bits as the single-operand
/// sub-opcode and immediate. Which accessors are meaningful depends on the
/// opcode, which is why [`crate::isa::decode::decode`] drives extraction.
pub trait InstructionWord {
    /// Extracts the opcode field (bits 31:28).
    ///
    /// Zero selects the single-operand family; any other value is itself a
    /// double-operand operation code.
    fn opcode(&self) -> u32;

    /// Extracts the single-operand sub-opcode field (bits 27:24).
    fn sub_opcode(&self) -> u32;

    /// Extracts the 10-bit single-operand immediate field (bits 23:14).
    fn immediate(&self) -> u32;

    /// Extracts the single 14-bit address field (bits 13:0).
    ///
    /// For double-operand words this is the second address, `addr2`.
    fn addr(&self) -> usize;

    /// Extracts the first 14-bit address field of a double-operand word
    /// (bits 27:14).
    fn addr1(&self) -> usize;
}

impl InstructionWord for u64 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        ((self >> OPCODE_SHIFT) & OPCODE_MASK) as u32
    }

    #[inline(always)]
    fn sub_opcode(&self) -> u32 {
        ((self >> SUB_OPCODE_SHIFT) & SUB_OPCODE_MASK) as u32
    }

    #[inline(always)]
    fn immediate(&self) -> u32 {
        ((self >> IMMEDIATE_SHIFT) & IMMEDIATE_MASK) as u32
    }

    #[inline(always)]
    fn addr(&self) -> usize {
        (self & ADDR_MASK) as usize
    }

    #[inline(always)]
    fn addr1(&self) -> usize {
        ((self >> ADDR1_SHIFT) & ADDR_MASK) as usize
    }
}
