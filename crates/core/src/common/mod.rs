//! Common constants and types used throughout the interpreter.
//!
//! This module provides the building blocks shared across all components:
//! 1. **Constants:** Address-space size, well-known cell addresses, and the
//!    bit-level layout of the instruction word and image frames.
//! 2. **Error Handling:** Load and execution failure types carrying full
//!    diagnostic context.

/// System-wide constants (address space, field masks, wire formats).
pub mod constants;

/// Error types for image loading and instruction execution.
pub mod error;

pub use constants::MEMORY_CELLS;
pub use error::{ExecutionError, LoadError};
