//! Instruction decoder.
//!
//! This module decodes one packed instruction word into the structured
//! [`Decoded`] form. It extracts the opcode that selects between the two
//! instruction families and the operand fields of whichever shape applies.
//! Decoding is pure and cheap; callers re-decode on every execution rather
//! than caching results.

use std::fmt;

use crate::common::constants::{COMPARATOR_MASK, COMPARATOR_SHIFT};
use crate::isa::word::InstructionWord;

/// One decoded instruction in either of the machine's two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// Single-operand instruction (opcode field was zero).
    Single {
        /// The nested sub-opcode selecting the operation.
        op: u32,
        /// The 10-bit immediate; compare instructions carry their comparator
        /// code in its upper bits.
        immediate: u32,
        /// The 14-bit operand cell address.
        addr: usize,
    },
    /// Double-operand instruction (opcode field was non-zero).
    Double {
        /// The opcode selecting the operation.
        op: u32,
        /// The first 14-bit operand cell address.
        addr1: usize,
        /// The second 14-bit operand cell address.
        addr2: usize,
    },
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Single { op, immediate, addr } => {
                write!(f, "S-op {op} imm={immediate} addr={addr:#06x}")
            }
            Decoded::Double { op, addr1, addr2 } => {
                write!(f, "D-op {op} addr1={addr1:#06x} addr2={addr2:#06x}")
            }
        }
    }
}

/// Decodes one packed instruction word.
///
/// Words with a zero opcode field decode as [`Decoded::Single`] with the
/// nested sub-opcode, immediate, and address; all others decode as
/// [`Decoded::Double`] with two wide address fields. Decoding never fails:
/// unknown operation codes are rejected at execution time, not here.
#[inline]
pub fn decode(word: u64) -> Decoded {
    let op = word.opcode();
    if op == 0 {
        Decoded::Single {
            op: word.sub_opcode(),
            immediate: word.immediate(),
            addr: word.addr(),
        }
    } else {
        Decoded::Double {
            op,
            addr1: word.addr1(),
            addr2: word.addr(),
        }
    }
}

/// Comparison applied against zero by the compare instruction.
///
/// Codes 0 through 4 map to the five comparators below; codes 5 through 7
/// are unassigned and fail execution with a bad-comparator error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `value < 0`
    LessThan,
    /// `value <= 0`
    LessOrEqual,
    /// `value == 0`
    Equal,
    /// `value >= 0`
    GreaterOrEqual,
    /// `value > 0`
    GreaterThan,
}

impl Comparator {
    /// Extracts the 3-bit comparator code from a compare immediate.
    #[inline]
    pub fn code_of(immediate: u32) -> u32 {
        (immediate >> COMPARATOR_SHIFT) & COMPARATOR_MASK
    }

    /// Maps a 3-bit comparator code to its comparator, if assigned.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::LessThan),
            1 => Some(Self::LessOrEqual),
            2 => Some(Self::Equal),
            3 => Some(Self::GreaterOrEqual),
            4 => Some(Self::GreaterThan),
            _ => None,
        }
    }

    /// Applies the comparison of `value` against zero.
    ///
    /// NaN compares false under every comparator, matching IEEE 754 ordered
    /// comparison semantics.
    #[inline]
    pub fn eval(self, value: f64) -> bool {
        match self {
            Self::LessThan => value < 0.0,
            Self::LessOrEqual => value <= 0.0,
            Self::Equal => value == 0.0,
            Self::GreaterOrEqual => value >= 0.0,
            Self::GreaterThan => value > 0.0,
        }
    }
}
