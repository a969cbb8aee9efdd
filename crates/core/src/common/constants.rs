//! Global system constants.
//!
//! This module defines the fixed parameters of the machine. It includes:
//! 1. **Address Space:** The cell count shared by all four memory arrays.
//! 2. **Well-Known Cells:** The halt output and configuration input addresses.
//! 3. **Instruction Layout:** Masks and shifts for the packed 32-bit word.
//! 4. **Wire Formats:** Image frame size and trace file magic/version.

/// Number of cells in the machine's address space.
///
/// Every cell address simultaneously names a slot in the data, program,
/// input, and output arrays. All address fields decoded from instruction
/// words are validated against this bound.
pub const MEMORY_CELLS: usize = 16385;

/// Output cell polled for the halt condition after every sweep.
///
/// A non-zero value at this address ends the run; the value itself is the
/// run's score.
pub const HALT_CELL: usize = 0;

/// Input cell that receives the run's configuration value before iteration 0.
pub const CONFIGURATION_CELL: usize = 0x3e80;

/// Bit position of the 4-bit opcode field (bits 31:28).
pub const OPCODE_SHIFT: u32 = 28;

/// Bit mask for the opcode field after shifting.
pub const OPCODE_MASK: u64 = 0xF;

/// Bit position of the single-operand sub-opcode field (bits 27:24).
pub const SUB_OPCODE_SHIFT: u32 = 24;

/// Bit mask for the sub-opcode field after shifting.
pub const SUB_OPCODE_MASK: u64 = 0xF;

/// Bit position of the 10-bit immediate field (bits 23:14).
pub const IMMEDIATE_SHIFT: u32 = 14;

/// Bit mask for the immediate field after shifting.
pub const IMMEDIATE_MASK: u64 = 0x3FF;

/// Bit position of the first address field of a double-operand word (bits 27:14).
pub const ADDR1_SHIFT: u32 = 14;

/// Bit mask for a 14-bit address field.
pub const ADDR_MASK: u64 = 0x3FFF;

/// Bit position of the comparator code within the immediate field.
pub const COMPARATOR_SHIFT: u32 = 7;

/// Bit mask for the 3-bit comparator code after shifting.
pub const COMPARATOR_MASK: u32 = 0x7;

/// Size in bytes of one program image frame (one f64 and one u32).
pub const FRAME_SIZE: usize = 12;

/// Magic number opening a serialized input trace file.
pub const TRACE_MAGIC: u32 = 0xCAFE_BABE;

/// Trace file format version emitted and accepted by this interpreter.
pub const TRACE_VERSION: u32 = 668;
