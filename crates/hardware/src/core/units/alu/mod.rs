//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. All
//! arithmetic is on 32-bit machine words and wraps on overflow.

use crate::isa::Opcode;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation; register-immediate forms use the same arithmetic as
    ///   their register-register counterparts.
    /// * `a`  - First operand.
    /// * `b`  - Second operand (the immediate for `ADDI`/`SUBI`).
    ///
    /// # Returns
    ///
    /// The 32-bit result. Division is unsigned and a zero divisor yields
    /// `0xFFFF_FFFF`. Opcodes the ALU does not implement yield 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomsim_core::core::units::alu::Alu;
    /// use tomsim_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Add, 5, 10), 15);
    /// assert_eq!(Alu::execute(Opcode::Subi, 0, 1), 0xFFFF_FFFF);
    /// assert_eq!(Alu::execute(Opcode::Div, 100, 7), 14);
    /// ```
    pub fn execute(op: Opcode, a: u32, b: u32) -> u32 {
        match op {
            Opcode::Add | Opcode::Addi => a.wrapping_add(b),
            Opcode::Sub | Opcode::Subi => a.wrapping_sub(b),
            Opcode::Xor => a ^ b,
            Opcode::And => a & b,
            Opcode::Mult => a.wrapping_mul(b),
            Opcode::Div => a.checked_div(b).unwrap_or(u32::MAX),
            _ => 0,
        }
    }
}
