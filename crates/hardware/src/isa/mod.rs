//! Instruction Set Architecture (ISA) Definitions.
//!
//! The simulated machine executes a small load/store instruction set with
//! 32 integer and 32 single-precision floating-point registers.
//!
//! # Modules
//!
//! * `opcode`: Opcode set and its classification (memory, ALU, branch, ...).
//! * `instruction`: The decoded instruction record stored in the instruction table.
//! * `program`: The fixed-capacity instruction table addressed by program counter.
//! * `asm`: Assembly text parser that builds a [`Program`].
//! * `disasm`: Human-readable rendering of decoded instructions.

/// Assembly text parser (labels, register and memory operands, immediates).
pub mod asm;

/// Instruction disassembler for traces, dumps, and test diagnostics.
pub mod disasm;

/// Decoded instruction record and constructors.
pub mod instruction;

/// Opcode enumeration and classification helpers.
pub mod opcode;

/// Fixed-capacity instruction table indexed by program counter.
pub mod program;

pub use instruction::Instruction;
pub use opcode::{OpClass, Opcode, RegFile};
pub use program::Program;
