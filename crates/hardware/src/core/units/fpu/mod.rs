//! Floating-Point Unit (FPU).
//!
//! Single-precision arithmetic for `ADDS`, `SUBS`, `MULTS`, and `DIVS`. Register
//! payloads are 32-bit words reinterpreted as IEEE 754 `f32` bit patterns.

use crate::isa::Opcode;

/// Floating-Point Unit for single-precision operations.
#[derive(Debug)]
pub struct Fpu;

impl Fpu {
    /// Executes a floating-point operation on two register payloads.
    ///
    /// Returns the bit pattern of the `f32` result; opcodes the FPU does not
    /// implement yield 0.
    ///
    /// ```
    /// use tomsim_core::core::units::fpu::Fpu;
    /// use tomsim_core::isa::Opcode;
    ///
    /// let r = Fpu::execute(Opcode::Mults, 1.5f32.to_bits(), 4.0f32.to_bits());
    /// assert_eq!(f32::from_bits(r), 6.0);
    /// ```
    pub fn execute(op: Opcode, a: u32, b: u32) -> u32 {
        let (x, y) = (f32::from_bits(a), f32::from_bits(b));
        let r = match op {
            Opcode::Adds => x + y,
            Opcode::Subs => x - y,
            Opcode::Mults => x * y,
            Opcode::Divs => x / y,
            _ => return 0,
        };
        r.to_bits()
    }
}
