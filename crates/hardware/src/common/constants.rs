//! Global System Constants.
//!
//! This module defines the machine-wide constants of the simulated pipeline:
//! 1. **Register Constants:** Architectural register counts per file.
//! 2. **Instruction Constants:** Instruction width and default table capacity.
//! 3. **Memory Constants:** Word width and the power-on fill pattern.

/// Number of registers in each architectural register file (integer and FP).
pub const NUM_REGS: usize = 32;

/// Size of one instruction in the instruction table, in bytes.
pub const INSTRUCTION_BYTES: u32 = 4;

/// Default number of slots in the instruction table.
pub const DEFAULT_PROGRAM_CAPACITY: usize = 50;

/// Value reported by a register that has never been written.
pub const UNDEFINED: u32 = 0xFFFF_FFFF;

/// Width of a data memory word in bytes (loads and stores move one word).
pub const WORD_BYTES: usize = 4;

/// Byte pattern data memory holds after power-on or reset.
pub const MEMORY_FILL: u8 = 0xFF;
