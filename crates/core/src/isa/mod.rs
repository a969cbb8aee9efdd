//! Instruction set definitions.
//!
//! The machine packs every instruction into a 32-bit word (stored widened to
//! 64 bits). The top 4 bits select the operation: a non-zero value is one of
//! the double-operand operations carrying two 14-bit cell addresses, while
//! zero escapes into a second, nested opcode space of single-operand
//! operations carrying a 10-bit immediate and one 14-bit address. This
//! asymmetry buys 15 wide-address binary operations plus up to 16
//! narrow-immediate unary operations in the same word width.

/// Instruction decoding into the two-shape structured form.
pub mod decode;

/// Bit-field extraction from the raw instruction word.
pub mod word;

pub use decode::{Comparator, Decoded, decode};
pub use word::InstructionWord;
